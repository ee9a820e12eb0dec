//! reqwest-backed implementation of [`QuestionApi`].

use url::Url;

use super::{QuestionApi, QuestionError, QuestionResponse};

/// HTTP client for the question endpoint.
///
/// No retries and no explicit timeout are configured; the request runs with
/// the defaults of the underlying [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct QuestionClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl QuestionClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, QuestionError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, QuestionError> {
        let base = Url::parse(base_url.as_ref())?;
        let endpoint = Url::parse(&format!(
            "{}/question",
            base.as_str().trim_end_matches('/')
        ))?;
        Ok(Self { endpoint, http })
    }

    /// Endpoint questions are posted to, without the query string.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `question`.
    #[must_use]
    pub fn question_url(&self, question: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("question", question);
        url
    }
}

#[async_trait::async_trait]
impl QuestionApi for QuestionClient {
    async fn ask(&self, question: &str) -> Result<QuestionResponse, QuestionError> {
        if question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }

        let response = self.http.post(self.question_url(question)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuestionError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
