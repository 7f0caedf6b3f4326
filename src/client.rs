use anyhow::{Error, Result, anyhow};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    config::Config,
    models::request::{AnalyticsQuery, BulkSendRequest, SendRequest},
};

pub struct MailApiClient {
    http_client: Client,
    base_url: Url,
}

impl MailApiClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|_| anyhow!("Invalid API base URL: {}", config.api_base_url))?;

        info!(base_url = %base_url, "Mail API client initialized");

        Ok(Self {
            http_client: Client::new(),
            base_url,
        })
    }

    pub async fn send(&self, payload: &SendRequest) -> Result<Value, Error> {
        debug!(
            tenant_id = %payload.tenant_id,
            template_id = %payload.template_id,
            recipient = %payload.recipient.email,
            idempotency_key = %payload.idempotency_key,
            "Submitting transactional send"
        );

        let url = self.endpoint(&["send"])?;

        let response = self
            .http_client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|_| anyhow!("Request to mail API failed"))?;

        Self::parse_response(response).await
    }

    pub async fn send_bulk(&self, payload: &BulkSendRequest) -> Result<Value, Error> {
        if payload.recipients.is_empty() {
            return Err(anyhow!("Add at least one recipient email"));
        }

        debug!(
            tenant_id = %payload.tenant_id,
            template_id = %payload.template_id,
            recipient_count = payload.recipients.len(),
            batch_size = payload.batch_size,
            "Submitting bulk send"
        );

        let url = self.endpoint(&["send", "bulk"])?;

        let response = self
            .http_client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|_| anyhow!("Request to mail API failed"))?;

        Self::parse_response(response).await
    }

    pub async fn get_email(&self, email_id: &str, tenant_id: &str) -> Result<Value, Error> {
        debug!(email_id, tenant_id, "Fetching email delivery status");

        let mut url = self.endpoint(&["emails", email_id])?;
        url.query_pairs_mut().append_pair("tenant_id", tenant_id);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|_| anyhow!("Request to mail API failed"))?;

        Self::parse_response(response).await
    }

    pub async fn get_analytics(&self, query: &AnalyticsQuery) -> Result<Value, Error> {
        debug!(
            tenant_id = %query.tenant_id,
            group_by = %query.group_by,
            "Fetching analytics"
        );

        let mut url = self.endpoint(&["analytics"])?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("tenant_id", &query.tenant_id);
            pairs.append_pair("group_by", &query.group_by.to_string());

            if let Some(from) = &query.from {
                pairs.append_pair("from", from);
            }
            if let Some(to) = &query.to {
                pairs.append_pair("to", to);
            }
            if let Some(template_id) = &query.template_id {
                pairs.append_pair("template_id", template_id);
            }
        }

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|_| anyhow!("Request to mail API failed"))?;

        Self::parse_response(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| anyhow!("API base URL cannot serve as a base"))?;
            path.pop_if_empty();

            for segment in segments {
                path.push(segment);
            }
        }

        Ok(url)
    }

    async fn parse_response(response: Response) -> Result<Value, Error> {
        let status = response.status();

        let text = response
            .text()
            .await
            .map_err(|_| anyhow!("Failed to read mail API response"))?;

        debug!(status = %status, "Mail API responded");

        // An unparseable body is carried as opaque text; only the status
        // decides success or failure.
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status.is_success() {
            return Ok(body);
        }

        Err(anyhow!("{}", Self::failure_message(status, &body)))
    }

    fn failure_message(status: StatusCode, body: &Value) -> String {
        let detail = match body {
            Value::Object(fields) => match fields.get("detail") {
                Some(value) if !value.is_null() => value,
                _ => body,
            },
            _ => body,
        };

        match detail {
            Value::Null => format!("HTTP {}", status.as_u16()),
            Value::String(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
