// src/client.rs
//! Transport to the Tulu backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Config,
    error::BackendError,
    message::{Scene, ScenesResponse, TutorRequest, TutorResponse, WordEntry},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Backend: Send + Sync {
    async fn ask_tutor(&self, request: &TutorRequest) -> Result<TutorResponse, BackendError>;

    async fn fetch_scenes(&self) -> Result<Vec<Scene>, BackendError>;

    async fn lookup_word(&self, word: &str) -> Result<WordEntry, BackendError>;
}

/// `Backend` over HTTP. No retries; each call either resolves or fails once.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(BackendError::Transport)?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(config.backend_url.clone(), config.request_timeout)
    }

    /// `{base}/api/{segments..}`, each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn ask_tutor(&self, request: &TutorRequest) -> Result<TutorResponse, BackendError> {
        let url = self.endpoint(&["tutor"]);
        debug!(%url, has_session = request.session_id.is_some(), "asking tutor");
        let response = self.http.post(url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn fetch_scenes(&self) -> Result<Vec<Scene>, BackendError> {
        let response = self.http.get(self.endpoint(&["scenes"])).send().await?;
        let body: ScenesResponse = Self::decode(response).await?;
        Ok(body.scenes)
    }

    async fn lookup_word(&self, word: &str) -> Result<WordEntry, BackendError> {
        let response = self.http.get(self.endpoint(&["word", word])).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoint_joins_under_api() {
        let b = backend("http://localhost:3000");
        assert_eq!(b.endpoint(&["tutor"]).as_str(), "http://localhost:3000/api/tutor");

        let b = backend("https://host/prefix/");
        assert_eq!(b.endpoint(&["scenes"]).as_str(), "https://host/prefix/api/scenes");
    }

    #[test]
    fn word_segment_is_encoded() {
        let b = backend("http://localhost:3000");
        assert_eq!(
            b.endpoint(&["word", "iyi günler"]).as_str(),
            "http://localhost:3000/api/word/iyi%20g%C3%BCnler"
        );
        assert_eq!(
            b.endpoint(&["word", "a/b"]).as_str(),
            "http://localhost:3000/api/word/a%2Fb"
        );
    }
}
