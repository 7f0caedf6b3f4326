use std::collections::HashMap;

use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::models::request::Recipient;

pub fn parse_json_object(field_name: &str, text: &str) -> Result<HashMap<String, Value>> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Ok(HashMap::new());
    }

    serde_json::from_str(trimmed).map_err(|_| anyhow!("{} must be a valid JSON object", field_name))
}

pub fn parse_recipient_list(text: &str) -> Result<Vec<Recipient>> {
    let recipients: Vec<Recipient> = text
        .split(',')
        .map(|email| email.trim())
        .filter(|email| !email.is_empty())
        .map(|email| Recipient {
            email: email.to_string(),
            name: None,
        })
        .collect();

    if recipients.is_empty() {
        return Err(anyhow!("Add at least one recipient email"));
    }

    Ok(recipients)
}
