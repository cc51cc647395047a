//! Profile store: the single point of contact with the hosted data backend.
//!
//! The renderer only ever asks one question: "give me the newest profile".
//! `ProfileSource` is the seam; `AppState` carries an `Arc<dyn ProfileSource>`
//! so tests swap in an in-memory source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::profile::{Profile, ProfileRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the profile to render.
///
/// `Ok(None)` is the explicit "not found" signal: the query succeeded but
/// the collection is empty.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn newest_profile(&self) -> Result<Option<Profile>, StoreError>;
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// Reads the newest profile row over the backend's PostgREST interface:
/// all columns, ordered by creation time descending, at most one row.
#[derive(Clone)]
pub struct SupabaseProfileSource {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseProfileSource {
    pub fn new(
        base_url: &str,
        anon_key: String,
        table: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            table,
        })
    }

    fn newest_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order=creado_en.desc&limit=1",
            self.base_url, self.table
        )
    }
}

#[async_trait]
impl ProfileSource for SupabaseProfileSource {
    async fn newest_profile(&self) -> Result<Option<Profile>, StoreError> {
        let url = self.newest_url();
        debug!("Fetching newest profile from {url}");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        parse_newest(&body)
    }
}

/// Decodes a PostgREST result set and normalizes its first row.
fn parse_newest(body: &str) -> Result<Option<Profile>, StoreError> {
    let rows: Vec<ProfileRow> = serde_json::from_str(body)?;
    Ok(rows.into_iter().next().map(Profile::from_row))
}

fn api_error(status: u16, body: String) -> StoreError {
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    StoreError::Api { status, message }
}
