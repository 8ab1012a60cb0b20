use anyhow::{Context, Result};
use reqwest::header::{ETAG, LAST_MODIFIED};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::models::RiskLevel;

/// One row of the remote risk table. Hosted tables name the key column `term`.
#[derive(Debug, Deserialize)]
struct RemoteTerm {
    #[serde(alias = "term")]
    key: String,
    level: RiskLevel,
    #[serde(default)]
    explanation: Option<String>,
}

/// Download a dictionary snapshot from `url`.
///
/// Returns `Ok(None)` when the server answers with a non-success status so
/// the caller can keep its current snapshot. A table that fails validation
/// is an error.
pub async fn fetch_dictionary(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
) -> Result<Option<Dictionary>> {
    let mut request = client.get(url).header("User-Agent", super::USER_AGENT);
    if let Some(key) = api_key {
        request = request.header("apikey", key).bearer_auth(key);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        warn!(url = %url, status = %response.status(), "dictionary download failed");
        return Ok(None);
    }

    let version = response
        .headers()
        .get(ETAG)
        .or_else(|| response.headers().get(LAST_MODIFIED))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_matches('"').to_string());

    let rows: Vec<RemoteTerm> = response
        .json()
        .await
        .with_context(|| format!("Dictionary at {} is not a term list", url))?;

    let entries = rows.into_iter().map(|row| {
        DictionaryEntry::new(row.key, row.level, row.explanation.unwrap_or_default())
    });
    let dictionary = Dictionary::from_entries(version, entries)
        .with_context(|| format!("Dictionary at {} failed validation", url))?;

    info!(url = %url, terms = dictionary.len(), "dictionary downloaded");
    Ok(Some(dictionary))
}
