//! Team member records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use uplift_core::MemberId;

/// Default role assigned when a member is created without one.
pub const DEFAULT_ROLE: &str = "Core";

/// A team member on the public team page.
///
/// `role` is free text rather than a closed enum so new deployments can
/// introduce roles without a schema change.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insta_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_ref: Option<String>,
    /// Manual ordering slot; the public list sorts by this ascending.
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a member.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub insta_id: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub photo_url: Option<String>,
    pub backend_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let member = Member {
            id: MemberId::generate(),
            name: "Asha Rao".to_string(),
            role: "Founder".to_string(),
            bio: None,
            insta_id: Some("asha.rao".to_string()),
            email: None,
            contact: None,
            photo_url: Some("/uploads/1700000000-asha.jpg".to_string()),
            backend_ref: None,
            position: 0,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&member).expect("serialize");
        assert_eq!(json["name"], "Asha Rao");
        assert_eq!(json["instaId"], "asha.rao");
        assert_eq!(json["photoUrl"], "/uploads/1700000000-asha.jpg");
        assert_eq!(json["position"], 0);
        assert!(json.get("bio").is_none());
    }
}
