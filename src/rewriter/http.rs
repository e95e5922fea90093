use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{RewriteError, Rewriter};
use crate::form::{RewriteRequest, RewriteResult};

/// A rewriter that POSTs to the rewriting service over HTTP.
pub struct HttpRewriter {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRewriter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Rewriter for HttpRewriter {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResult, RewriteError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            culture = %request.target_culture,
            tone = ?request.tone_emphasis,
            "sending rewrite request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let err = classify(e);
                tracing::warn!(error = %err, "rewrite request failed");
                err
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RewriteError::Unexpected(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let detail = extract_detail(&text);
            tracing::warn!(%status, ?detail, "rewriting service returned an error");
            return Err(RewriteError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        // An empty success body is a result with every field blank
        if text.trim().is_empty() {
            tracing::debug!(%status, "rewrite succeeded with an empty body");
            return Ok(RewriteResult::default());
        }

        let result: RewriteResult = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(error = %e, raw = %text, "undecodable rewrite response");
            RewriteError::Unexpected(format!("invalid response from server: {e}"))
        })?;

        tracing::debug!(%status, "rewrite succeeded");
        Ok(result)
    }

    /// Asks the service root, which answers with a greeting.
    async fn ping(&self) -> Result<String, RewriteError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| RewriteError::Unexpected(format!("invalid endpoint: {e}")))?;
        url.set_path("/");
        url.set_query(None);

        tracing::debug!(%url, "pinging rewriting service");
        let resp = self.client.get(url).send().await.map_err(classify)?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RewriteError::Unexpected(e.to_string()))?;

        if !status.is_success() {
            return Err(RewriteError::Server {
                status: status.as_u16(),
                detail: extract_detail(&text),
            });
        }

        let greeting = serde_json::from_str::<Greeting>(&text)
            .map(|g| g.message)
            .unwrap_or(text);
        Ok(greeting)
    }
}

/// A request that never got built is our fault; anything after that means
/// the server never answered.
fn classify(err: reqwest::Error) -> RewriteError {
    if err.is_builder() {
        RewriteError::Unexpected(err.to_string())
    } else {
        RewriteError::Unreachable(err.to_string())
    }
}

/// Pull the `detail` field out of an error body.
///
/// Strings pass through. Structured details (validation error lists) are
/// rendered as compact JSON. Empty or null details count as absent.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Deserialize)]
struct Greeting {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::DraftEmail;
    use crate::options::Culture;

    #[test]
    fn extract_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "Culture not supported"}"#),
            Some("Culture not supported".to_string())
        );
    }

    #[test]
    fn extract_detail_structured() {
        let detail = extract_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#)
            .unwrap();
        assert!(detail.starts_with('['));
        assert!(detail.contains("field required"));
    }

    #[test]
    fn extract_detail_absent() {
        assert_eq!(extract_detail(r#"{"error": "boom"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": null}"#), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(""), None);
    }

    #[test]
    fn endpoint_is_kept() {
        let rewriter = HttpRewriter::new("http://localhost:8000/rewrite");
        assert_eq!(rewriter.endpoint(), "http://localhost:8000/rewrite");
    }

    #[tokio::test]
    async fn invalid_endpoint_is_unexpected() {
        let rewriter = HttpRewriter::new("not a url");
        let draft = DraftEmail {
            subject: String::new(),
            body: "hello".to_string(),
        };
        let request = RewriteRequest::new(&draft, Culture::Japan, None);
        let err = rewriter.rewrite(&request).await.unwrap_err();
        assert!(matches!(err, RewriteError::Unexpected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn ping_invalid_endpoint_is_unexpected() {
        let rewriter = HttpRewriter::new("::nope::");
        let err = rewriter.ping().await.unwrap_err();
        assert!(matches!(err, RewriteError::Unexpected(_)));
    }
}
