use reqwest::Client;
use tracing::info;

use crate::classification::model::ModelError;

/// Reads a JSON artifact from an `http(s)://` URL or a local path.
pub async fn load_artifact(client: &Client, location: &str) -> Result<String, ModelError> {
    if is_remote(location) {
        info!("Fetching artifact from {location}");
        let body = client
            .get(location)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    } else {
        info!("Reading artifact from {location}");
        Ok(tokio::fs::read_to_string(location).await?)
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
