//! Text-to-speech over HTTP: `GET <endpoint>?text=...&lang=...` returning MP3 bytes.

use crate::domain::ports::Mp3Generator;
use crate::utils::error::{FakeFileError, Result};
use crate::utils::validation::validate_url;
use indexmap::IndexMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTtsMp3Generator {
    pub endpoint: String,
    pub lang: String,
    pub text_param: String,
    pub lang_param: String,
    pub headers: IndexMap<String, String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for HttpTtsMp3Generator {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            lang: "en".to_string(),
            text_param: "text".to_string(),
            lang_param: "lang".to_string(),
            headers: IndexMap::new(),
            timeout_seconds: Some(30),
        }
    }
}

impl HttpTtsMp3Generator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn request_url(&self, text: &str) -> Result<Url> {
        validate_url("endpoint", &self.endpoint)?;
        let mut url = Url::parse(&self.endpoint).map_err(|e| FakeFileError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair(&self.text_param, text)
            .append_pair(&self.lang_param, &self.lang);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>> {
        let client = Client::new();
        let mut request = client.get(url);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        tracing::debug!("TTS response status: {}", response.status());
        let response = response.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl Mp3Generator for HttpTtsMp3Generator {
    fn name(&self) -> &'static str {
        "http_tts"
    }

    fn generate(&self, text: &str) -> Result<Vec<u8>> {
        let url = self.request_url(text)?;
        tracing::debug!("Requesting speech from {}", self.endpoint);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let bytes = runtime.block_on(self.fetch(url))?;
        if bytes.is_empty() {
            return Err(FakeFileError::converter("http_tts", "endpoint returned no audio"));
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_text() {
        let generator = HttpTtsMp3Generator::new("https://tts.example.com/speak?voice=a");
        let url = generator.request_url("hello world & more").unwrap();
        assert_eq!(
            url.as_str(),
            "https://tts.example.com/speak?voice=a&text=hello+world+%26+more&lang=en"
        );
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        let generator = HttpTtsMp3Generator::default();
        assert!(generator.generate("hi").is_err());
    }
}
