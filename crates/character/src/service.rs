use std::sync::Arc;

use async_trait::async_trait;
use result_cache::Cache;
use tracing::instrument;

use crate::{Character, CharacterError, CharacterRepository, CharacterService};

/// Character lookups through a result cache keyed by the decimal character id.
///
/// Failed lookups are never cached, so a character that was private a minute ago is fetched
/// again on the next request.
pub struct CachedCharacterService {
    repository: Arc<dyn CharacterRepository>,
    cache: Arc<dyn Cache<Character, CharacterError>>,
}

impl CachedCharacterService {
    pub fn new(
        repository: Arc<dyn CharacterRepository>,
        cache: Arc<dyn Cache<Character, CharacterError>>,
    ) -> Self {
        Self { repository, cache }
    }

    /// Cache key for a character id.
    pub fn cache_key(id: i64) -> String {
        id.to_string()
    }
}

#[async_trait]
impl CharacterService for CachedCharacterService {
    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Character, CharacterError> {
        let repository = Arc::clone(&self.repository);
        self.cache
            .get_or_compute(
                &Self::cache_key(id),
                Box::pin(async move { repository.get(id).await.map_err(CharacterError::from) }),
            )
            .await
    }

    async fn forget(&self, id: i64) {
        self.cache.clear(&Self::cache_key(id)).await;
    }
}
