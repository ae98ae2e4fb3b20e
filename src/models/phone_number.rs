use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::TelephonyProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub country: Option<String>,
    pub provider: TelephonyProvider,
    pub status: PhoneNumberStatus,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub renewal_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub monthly_cost: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhoneNumberStatus {
    Available,
    Assigned,
    Deleted,
}

/// A number offered for purchase by the telephony provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableNumber {
    pub number: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub monthly_cost: Option<f64>,
}
