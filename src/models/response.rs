use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub email_id: String,
    pub status: String,
    pub idempotency_reused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSendResponse {
    pub bulk_id: String,
    pub queued_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: String,
    pub tenant_id: String,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub template_id: String,
    pub provider_name: String,
    pub provider_message_id: Option<String>,
    pub status: String,
    pub attempt_count: u32,
    pub failure_reason: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub totals: HashMap<String, u64>,
    pub rates: HashMap<String, f64>,
    pub series: Vec<Value>,
}
