use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    pub tenant_id: String,
    pub recipient: Recipient,
    pub template_id: String,
    pub variables: HashMap<String, Value>,

    #[serde(default)]
    pub metadata: HashMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_hint: Option<String>,

    pub idempotency_key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSendRequest {
    pub tenant_id: String,
    pub template_id: String,
    pub recipients: Vec<Recipient>,
    pub shared_variables: HashMap<String, Value>,
    pub per_recipient_variables: HashMap<String, Value>,

    #[serde(default)]
    pub metadata: HashMap<String, Value>,

    pub batch_size: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_hint: Option<String>,

    pub idempotency_key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupQuery {
    pub tenant_id: String,
    pub email_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub tenant_id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub group_by: GroupBy,
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Day,
    Hour,
}

impl Display for GroupBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            GroupBy::Day => write!(f, "day"),
            GroupBy::Hour => write!(f, "hour"),
        }
    }
}
