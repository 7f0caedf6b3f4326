use anyhow::{Error, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    client::MailApiClient,
    models::{
        request::{AnalyticsQuery, BulkSendRequest, GroupBy, LookupQuery, Recipient, SendRequest},
        response::{AnalyticsReport, BulkSendResponse, EmailRecord, SendResponse},
        validation::{parse_json_object, parse_recipient_list},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Send,
    Bulk,
    Lookup,
    Analytics,
}

impl Command {
    pub fn parse(name: &str) -> Result<Self, Error> {
        match name {
            "send" => Ok(Command::Send),
            "bulk" => Ok(Command::Bulk),
            "lookup" => Ok(Command::Lookup),
            "analytics" => Ok(Command::Analytics),
            other => Err(anyhow!(
                "Unknown command '{}' (expected send, bulk, lookup, or analytics)",
                other
            )),
        }
    }
}

fn default_send_key() -> String {
    format!("send-{}", Uuid::new_v4())
}

fn default_bulk_key() -> String {
    format!("bulk-{}", Uuid::new_v4())
}

fn default_batch_size() -> u32 {
    100
}

fn none_if_empty(value: String) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One submitted send form: a snapshot converted into exactly one request.
#[derive(Debug, Clone, Deserialize)]
pub struct SendForm {
    pub tenant_id: String,
    pub recipient_email: String,

    #[serde(default)]
    pub recipient_name: String,

    pub template_id: String,

    #[serde(default)]
    pub variables: String,

    #[serde(default)]
    pub metadata: String,

    #[serde(default)]
    pub provider_hint: String,

    #[serde(default = "default_send_key")]
    pub idempotency_key: String,

    #[serde(default)]
    pub send_at: String,
}

impl SendForm {
    pub fn into_request(self) -> Result<SendRequest, Error> {
        Ok(SendRequest {
            tenant_id: self.tenant_id,
            recipient: Recipient {
                email: self.recipient_email,
                name: none_if_empty(self.recipient_name),
            },
            template_id: self.template_id,
            variables: parse_json_object("variables", &self.variables)?,
            metadata: parse_json_object("metadata", &self.metadata)?,
            provider_hint: none_if_empty(self.provider_hint),
            idempotency_key: self.idempotency_key,
            send_at: none_if_empty(self.send_at),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkForm {
    pub tenant_id: String,
    pub template_id: String,

    /// Comma-separated recipient emails.
    pub recipients: String,

    #[serde(default)]
    pub shared_variables: String,

    #[serde(default)]
    pub per_recipient_variables: String,

    #[serde(default)]
    pub metadata: String,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    #[serde(default)]
    pub provider_hint: String,

    #[serde(default = "default_bulk_key")]
    pub idempotency_key: String,

    #[serde(default)]
    pub send_at: String,
}

impl BulkForm {
    pub fn into_request(self) -> Result<BulkSendRequest, Error> {
        Ok(BulkSendRequest {
            tenant_id: self.tenant_id,
            template_id: self.template_id,
            recipients: parse_recipient_list(&self.recipients)?,
            shared_variables: parse_json_object("shared_variables", &self.shared_variables)?,
            per_recipient_variables: parse_json_object(
                "per_recipient_variables",
                &self.per_recipient_variables,
            )?,
            metadata: parse_json_object("metadata", &self.metadata)?,
            batch_size: self.batch_size,
            provider_hint: none_if_empty(self.provider_hint),
            idempotency_key: self.idempotency_key,
            send_at: none_if_empty(self.send_at),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsForm {
    pub tenant_id: String,

    #[serde(default)]
    pub from: String,

    #[serde(default)]
    pub to: String,

    #[serde(default)]
    pub group_by: GroupBy,

    #[serde(default)]
    pub template_id: String,
}

impl AnalyticsForm {
    pub fn into_query(self) -> AnalyticsQuery {
        AnalyticsQuery {
            tenant_id: self.tenant_id,
            from: none_if_empty(self.from),
            to: none_if_empty(self.to),
            group_by: self.group_by,
            template_id: none_if_empty(self.template_id),
        }
    }
}

pub async fn run(command: Command, input: &str, client: &MailApiClient) -> Result<Value, Error> {
    match command {
        Command::Send => {
            let form: SendForm = serde_json::from_str(input)
                .map_err(|e| anyhow!("Invalid send form: {}", e))?;
            let request = form.into_request()?;
            let body = client.send(&request).await?;

            match serde_json::from_value::<SendResponse>(body.clone()) {
                Ok(accepted) => info!(
                    email_id = %accepted.email_id,
                    status = %accepted.status,
                    idempotency_reused = accepted.idempotency_reused,
                    "Send accepted"
                ),
                Err(_) => warn!("Send response did not match the documented shape"),
            }

            Ok(body)
        }
        Command::Bulk => {
            let form: BulkForm = serde_json::from_str(input)
                .map_err(|e| anyhow!("Invalid bulk form: {}", e))?;
            let request = form.into_request()?;
            let body = client.send_bulk(&request).await?;

            match serde_json::from_value::<BulkSendResponse>(body.clone()) {
                Ok(queued) => info!(
                    bulk_id = %queued.bulk_id,
                    queued_count = queued.queued_count,
                    "Bulk send queued"
                ),
                Err(_) => warn!("Bulk response did not match the documented shape"),
            }

            Ok(body)
        }
        Command::Lookup => {
            let query: LookupQuery = serde_json::from_str(input)
                .map_err(|e| anyhow!("Invalid lookup form: {}", e))?;
            let body = client.get_email(&query.email_id, &query.tenant_id).await?;

            if let Ok(record) = serde_json::from_value::<EmailRecord>(body.clone()) {
                info!(
                    email_id = %record.id,
                    status = %record.status,
                    attempt_count = record.attempt_count,
                    "Email record retrieved"
                );
            }

            Ok(body)
        }
        Command::Analytics => {
            let form: AnalyticsForm = serde_json::from_str(input)
                .map_err(|e| anyhow!("Invalid analytics form: {}", e))?;
            let query = form.into_query();
            let body = client.get_analytics(&query).await?;

            if let Ok(report) = serde_json::from_value::<AnalyticsReport>(body.clone()) {
                info!(buckets = report.series.len(), "Analytics report retrieved");
            }

            Ok(body)
        }
    }
}
