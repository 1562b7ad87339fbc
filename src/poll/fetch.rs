//! Sources a poller can read from

use std::marker::PhantomData;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self) -> crate::Result<T>;
}

/// `GET <url>` and decode the JSON body
pub struct HttpFetcher<T> {
    url: String,
    agent: ureq::Agent,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpFetcher<T> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            agent: ureq::agent(),
            _marker: PhantomData,
        }
    }

    /// `base` plus `path`, tolerating a trailing slash on `base`
    pub fn endpoint(base: &str, path: &str) -> Self {
        Self::new(format!("{}{}", base.trim_end_matches('/'), path))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<T> Fetcher<T> for HttpFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self) -> crate::Result<T> {
        let agent = self.agent.clone();
        let url = self.url.clone();
        // ureq is blocking
        let body = tokio::task::spawn_blocking(move || -> crate::Result<T> {
            let response = agent.get(&url).call()?;
            Ok(response.into_json::<T>()?)
        })
        .await??;
        Ok(body)
    }
}
