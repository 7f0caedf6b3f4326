use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid environmental variable"))?;
        Ok(config)
    }
}
