//! Repository tests against a real `PostgreSQL` database.
//!
//! These tests run only when `TEST_DATABASE_URL` is set; without it
//! each test logs a skip notice and returns. Records are created with
//! unique names and removed afterwards so the tests can share a
//! database.

#![allow(clippy::unwrap_used)]
#![allow(clippy::print_stderr)]

use sqlx::PgPool;
use uuid::Uuid;

use uplift_core::Tier;
use uplift_server::db::{DonorRepository, GalleryRepository, MemberRepository, RepositoryError};
use uplift_server::models::{NewDonor, NewGalleryImage, NewMember};

async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return None;
    };

    let pool = PgPool::connect(&url).await.expect("connect to test db");
    sqlx::migrate!().run(&pool).await.expect("run migrations");
    Some(pool)
}

fn new_donor(name: &str, tier: Tier) -> NewDonor {
    NewDonor {
        name: name.to_string(),
        tier,
        logo_url: None,
        website: None,
        donated_amount: None,
        donated_commodity: None,
    }
}

fn new_member(name: &str) -> NewMember {
    NewMember {
        name: name.to_string(),
        role: "Core".to_string(),
        bio: None,
        insta_id: None,
        email: None,
        contact: None,
        photo_url: None,
        backend_ref: None,
    }
}

#[tokio::test]
async fn test_donor_create_list_delete() {
    let Some(pool) = test_pool().await else { return };
    let repo = DonorRepository::new(&pool);

    let marker = Uuid::new_v4();
    let created = repo
        .create(&new_donor(&format!("donor-{marker}"), Tier::Gold))
        .await
        .unwrap();
    assert_eq!(created.tier, Tier::Gold);
    assert_eq!(created.position, 0);

    let listed = repo.list().await.unwrap();
    assert!(listed.iter().any(|d| d.id == created.id));

    repo.delete(created.id).await.unwrap();
    let listed = repo.list().await.unwrap();
    assert!(!listed.iter().any(|d| d.id == created.id));
}

#[tokio::test]
async fn test_donor_delete_missing_is_not_found() {
    let Some(pool) = test_pool().await else { return };
    let repo = DonorRepository::new(&pool);

    let result = repo.delete(uplift_core::DonorId::generate()).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_member_reorder_assigns_positions_by_index() {
    let Some(pool) = test_pool().await else { return };
    let repo = MemberRepository::new(&pool);

    let marker = Uuid::new_v4();
    let a = repo.create(&new_member(&format!("a-{marker}"))).await.unwrap();
    let b = repo.create(&new_member(&format!("b-{marker}"))).await.unwrap();
    let c = repo.create(&new_member(&format!("c-{marker}"))).await.unwrap();

    // Ordering [c, a, b] puts c first, then a, then b.
    repo.reorder(&[c.id, a.id, b.id]).await.unwrap();

    let a_pos = repo.get(a.id).await.unwrap().unwrap().position;
    let b_pos = repo.get(b.id).await.unwrap().unwrap().position;
    let c_pos = repo.get(c.id).await.unwrap().unwrap().position;
    assert_eq!((c_pos, a_pos, b_pos), (0, 1, 2));

    // An id omitted from the list keeps its position.
    repo.reorder(&[a.id, b.id]).await.unwrap();
    let c_pos = repo.get(c.id).await.unwrap().unwrap().position;
    assert_eq!(c_pos, 0);

    let listed = repo.list().await.unwrap();
    let index_of = |id| listed.iter().position(|m| m.id == id).unwrap();
    assert!(index_of(a.id) < index_of(b.id));

    for id in [a.id, b.id, c.id] {
        repo.delete(id).await.unwrap();
    }
}

#[tokio::test]
async fn test_gallery_featured_is_subset_in_list_order() {
    let Some(pool) = test_pool().await else { return };
    let repo = GalleryRepository::new(&pool);

    let marker = Uuid::new_v4();
    let mut created = Vec::new();
    for i in 0..3 {
        let image = repo
            .create(&NewGalleryImage {
                title: format!("img-{i}-{marker}"),
                url: format!("/uploads/{marker}-{i}.jpg"),
                backend_ref: None,
            })
            .await
            .unwrap();
        created.push(image);
    }

    assert!(!created[0].featured, "featured defaults to false");

    repo.set_featured(created[0].id, true).await.unwrap();
    repo.set_featured(created[2].id, true).await.unwrap();

    let all = repo.list().await.unwrap();
    let featured = repo.list_featured().await.unwrap();

    let ours: Vec<_> = featured
        .iter()
        .filter(|i| i.title.contains(&marker.to_string()))
        .collect();
    assert_eq!(ours.len(), 2);
    assert!(ours.iter().all(|i| i.featured));

    // Same relative order as the full list.
    let all_ids: Vec<_> = all
        .iter()
        .filter(|i| i.featured && i.title.contains(&marker.to_string()))
        .map(|i| i.id)
        .collect();
    let featured_ids: Vec<_> = ours.iter().map(|i| i.id).collect();
    assert_eq!(featured_ids, all_ids);

    for image in created {
        repo.delete(image.id).await.unwrap();
    }
}

#[tokio::test]
async fn test_set_featured_missing_is_not_found() {
    let Some(pool) = test_pool().await else { return };
    let repo = GalleryRepository::new(&pool);

    let result = repo.set_featured(uplift_core::ImageId::generate(), true).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}
