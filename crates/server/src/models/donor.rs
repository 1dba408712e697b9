//! Donor wall records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use uplift_core::{DonorId, Tier};

/// A donor shown on the public donor wall.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donated_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donated_commodity: Option<String>,
    /// Manual ordering slot set by the admin reorder operation.
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a donor.
#[derive(Debug, Clone)]
pub struct NewDonor {
    pub name: String,
    pub tier: Tier,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub donated_amount: Option<f64>,
    pub donated_commodity: Option<String>,
}
