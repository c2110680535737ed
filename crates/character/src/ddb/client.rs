use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::sheet::{CharacterSheet, Envelope, ErrorData};
use crate::{Character, CharacterRepository, RepositoryError};

/// Public DnD Beyond character service.
pub const DDB_API_BASE: &str = "https://character-service.dndbeyond.com";

const NOT_FOUND_MESSAGE: &str = "The resource requested was not found.";
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized Access Attempt.";

/// [`CharacterRepository`] backed by the DnD Beyond character service.
///
/// Only public characters can be read; private ones come back as
/// [`RepositoryError::AccessDenied`]. The HTTP client is cheap to clone and shares its
/// connection pool across clones.
#[derive(Debug, Clone)]
pub struct DdbClient {
    client: Client,
    base_url: String,
}

impl DdbClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DDB_API_BASE)
    }

    /// Points the client at another host (a mock server in tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn character_url(&self, id: i64) -> String {
        format!("{}/character/v5/character/{}", self.base_url, id)
    }
}

#[async_trait]
impl CharacterRepository for DdbClient {
    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Character, RepositoryError> {
        let url = self.character_url(id);
        debug!(url = %url, "Fetching character");

        // Error responses carry the same envelope with a non-2xx status, so the status is not checked.
        let body = self.client.get(&url).send().await?.text().await?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Failed to parse response");
            RepositoryError::Parse(e.to_string())
        })?;

        if !envelope.success {
            error!(
                message = %envelope.message,
                data = %envelope.data,
                "Failed to get character"
            );
            let data: ErrorData = serde_json::from_value(envelope.data.clone()).map_err(|e| {
                error!(error = %e, data = %envelope.data, "Failed to parse error data");
                RepositoryError::Parse(e.to_string())
            })?;

            return Err(match data.server_message.as_str() {
                NOT_FOUND_MESSAGE => RepositoryError::NotFound(id),
                UNAUTHORIZED_MESSAGE => RepositoryError::AccessDenied(id),
                other => RepositoryError::Parse(format!("unexpected server message: {other}")),
            });
        }

        let sheet: CharacterSheet = serde_json::from_value(envelope.data).map_err(|e| {
            error!(error = %e, "Failed to parse character");
            RepositoryError::Parse(e.to_string())
        })?;

        sheet.into_character().map_err(|e| {
            error!(error = %e, "Failed to convert character sheet");
            RepositoryError::Parse(e)
        })
    }
}
