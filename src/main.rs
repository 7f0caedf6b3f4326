use std::io::Read;

use anyhow::{Error, Result, anyhow};
use mail_console::{
    client::MailApiClient,
    config::Config,
    console::{self, Command},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let command_name = std::env::args().nth(1).ok_or_else(|| {
        anyhow!("Usage: mail_console <send|bulk|lookup|analytics> (form JSON on stdin)")
    })?;
    let command = Command::parse(&command_name)?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let config = Config::load()?;
    let client = MailApiClient::new(&config)?;

    let body = console::run(command, &input, &client).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
