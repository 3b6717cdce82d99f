use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::QuoteClientError;
use crate::request::{QuoteRequest, QuoteResponse};

/// Delivers a quote request to the backend.
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    async fn submit(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteClientError>;
}

/// Posts quotes to `{base}/api/quote`.
pub struct HttpQuoteClient {
    client: Client,
    endpoint: Url,
}

impl HttpQuoteClient {
    /// # Errors
    ///
    /// Returns [`QuoteClientError::Http`] if the client cannot be built, or
    /// [`QuoteClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, QuoteClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("api/quote"))
            .map_err(|_| QuoteClientError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteSubmitter for HttpQuoteClient {
    /// Sends one request. No retry.
    ///
    /// A non-2xx status whose body is still a `{success, message}` envelope is
    /// returned as that envelope so the caller can show the server's message.
    async fn submit(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<QuoteResponse>(&body) {
            Ok(parsed) => {
                tracing::debug!(
                    status = status.as_u16(),
                    success = parsed.success,
                    "quote endpoint replied"
                );
                Ok(parsed)
            }
            Err(source) if status.is_success() => Err(QuoteClientError::Deserialize {
                context: self.endpoint.to_string(),
                source,
            }),
            Err(_) => Err(QuoteClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_api_quote() {
        let client = HttpQuoteClient::new("http://localhost:3000", 5, "test").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:3000/api/quote");

        let client = HttpQuoteClient::new("https://example.com/site/", 5, "test").unwrap();
        assert_eq!(client.endpoint().as_str(), "https://example.com/site/api/quote");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpQuoteClient::new("not a url", 5, "test"),
            Err(QuoteClientError::InvalidBaseUrl(_))
        ));
    }
}
