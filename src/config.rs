use anyhow::Result;
use reqwest::Client;

/// Everything the workflow needs to talk to the scoring service on behalf of
/// one customer. Populated from CLI flags or environment variables; nothing
/// here is ever hard-coded or persisted.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub username: String,
    pub password: String,
    pub customer_id: String,
    pub gls: String,
}

/// Build the shared HTTP client for all service calls.
pub fn http_client() -> Result<Client> {
    let client = Client::builder().user_agent("agscore-cli").build()?;
    Ok(client)
}
