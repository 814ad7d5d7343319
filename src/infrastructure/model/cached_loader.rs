use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::prediction::{ModelLoader, Predictor};
use crate::domain::DomainError;

/// Model loader wrapper that reuses the loaded model for a TTL
#[derive(Debug)]
pub struct CachedModelLoader<L: ModelLoader> {
    inner: L,
    cache: Cache<String, Arc<dyn Predictor>>,
}

impl<L: ModelLoader> CachedModelLoader<L> {
    pub fn new(inner: L, ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).max_capacity(1).build();

        Self { inner, cache }
    }
}

#[cfg(test)]
impl<L: ModelLoader> CachedModelLoader<L> {
    fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl<L: ModelLoader> ModelLoader for CachedModelLoader<L> {
    async fn load(&self) -> Result<Arc<dyn Predictor>, DomainError> {
        let key = self.inner.source();

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(source = %key, "Cache hit for model artifact");
            return Ok(cached);
        }

        tracing::debug!(source = %key, "Cache miss, loading model artifact");

        let model = self.inner.load().await?;
        self.cache.insert(key, model.clone()).await;

        Ok(model)
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }

    fn source(&self) -> String {
        self.inner.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::model::LinearRegressionModel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingLoader {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ModelLoader for CountingLoader {
        async fn load(&self) -> Result<Arc<dyn Predictor>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                return Err(DomainError::artifact_load("missing"));
            }

            Ok(Arc::new(LinearRegressionModel::new(vec![1.0], 0.0)?))
        }

        async fn is_available(&self) -> bool {
            !self.fail
        }

        fn source(&self) -> String {
            "counting".to_string()
        }
    }

    #[tokio::test]
    async fn test_second_load_hits_cache() {
        let loader = CachedModelLoader::new(CountingLoader::default(), Duration::from_secs(60));

        loader.load().await.unwrap();
        loader.load().await.unwrap();

        assert_eq!(loader.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let loader = CachedModelLoader::new(CountingLoader::default(), Duration::from_secs(60));

        loader.load().await.unwrap();
        loader.invalidate();
        loader.load().await.unwrap();

        assert_eq!(loader.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = CountingLoader {
            fail: true,
            ..Default::default()
        };
        let loader = CachedModelLoader::new(inner, Duration::from_secs(60));

        assert!(loader.load().await.is_err());
        assert!(loader.load().await.is_err());
        assert_eq!(loader.inner.calls.load(Ordering::SeqCst), 2);
    }
}
