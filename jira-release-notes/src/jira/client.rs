//! Jira REST API v2 client.
//!
//! Targets `/rest/api/2/search` as served by Jira Server and Data Center.

use super::{
    Issue, IssueFetcher, JiraCredentials, JiraError, SearchResponse, TransportError,
    VersionCandidate, VersionResolver,
};
use crate::rate_limit::{retry_after_secs, wait_for_retry_after};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

/// Fields requested for every issue in a search.
const SEARCH_FIELDS: &str = "summary,issuetype,status,fixVersions,components";

/// Jira client authenticating with HTTP basic auth.
#[derive(Debug, Clone)]
pub struct JiraClient {
    credentials: JiraCredentials,
    http: reqwest::Client,
}

impl JiraClient {
    /// Creates a client for the given Jira instance.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Transport`] if the HTTP client can't be built.
    pub fn new(credentials: JiraCredentials) -> Result<Self, JiraError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jira-release-notes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::from_request(&e))?;

        Ok(Self { credentials, http })
    }

    /// Returns the connection settings.
    pub fn credentials(&self) -> &JiraCredentials {
        &self.credentials
    }

    /// Builds `{base}/rest/api/2/{segments...}`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, JiraError> {
        let mut url = self.credentials.base_url().clone();
        url.path_segments_mut()
            .map_err(|()| JiraError::InvalidBaseUrl {
                url: self.credentials.base_url().to_string(),
            })?
            .pop_if_empty()
            .extend(["rest", "api", "2"])
            .extend(segments);
        Ok(url)
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// A `429` with a `Retry-After` header is waited out and retried once.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &'static str,
    ) -> Result<T, JiraError> {
        let mut retried = false;

        loop {
            debug!(url = %url, "Sending Jira request");
            let response = self
                .http
                .get(url.clone())
                .basic_auth(self.credentials.username(), Some(self.credentials.password()))
                .send()
                .await
                .map_err(|e| TransportError::from_request(&e))?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && !retried {
                if let Some(secs) = retry_after_secs(response.headers()) {
                    retried = true;
                    wait_for_retry_after(secs).await;
                    continue;
                }
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::from_request(&e))?;

            if !status.is_success() {
                warn!(status = status.as_u16(), "Jira request failed");
                return Err(TransportError::from_response(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown"),
                    content_type.as_deref(),
                    &body,
                )
                .into());
            }

            return serde_json::from_str(&body)
                .map_err(|source| JiraError::Decode { context, source });
        }
    }
}

#[async_trait]
impl IssueFetcher for JiraClient {
    async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<Issue>, JiraError> {
        let span = info_span!("search_issues", max_results);

        async {
            let mut url = self.endpoint(&["search"])?;
            url.query_pairs_mut()
                .append_pair("jql", jql)
                .append_pair("maxResults", &max_results.to_string())
                .append_pair("fields", SEARCH_FIELDS);

            let response: SearchResponse = self.get_json(url, "search").await?;
            debug!(
                returned = response.issues.len(),
                total = response.total,
                "Search complete"
            );
            Ok(response.issues)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl VersionResolver for JiraClient {
    async fn project_versions(&self, project: &str) -> Result<Vec<VersionCandidate>, JiraError> {
        let span = info_span!("project_versions", project = %project);

        async {
            let url = self.endpoint(&["project", project, "versions"])?;
            let versions: Vec<VersionCandidate> = self.get_json(url, "versions").await?;
            debug!(count = versions.len(), "Fetched project versions");
            Ok(versions)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(url: &str) -> JiraClient {
        JiraClient::new(JiraCredentials::new(url, "user", "token").unwrap()).unwrap()
    }

    /// A canned HTTP response served by [`serve`].
    struct Reply {
        status: &'static str,
        content_type: &'static str,
        headers: &'static str,
        body: &'static str,
    }

    impl Reply {
        fn json(status: &'static str, body: &'static str) -> Self {
            Self {
                status,
                content_type: "application/json;charset=UTF-8",
                headers: "",
                body,
            }
        }
    }

    /// Serves `replies` in order, one connection each, and records the request heads.
    async fn serve(replies: Vec<Reply>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            for reply in replies {
                let (mut stream, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                seen.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).into_owned());

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
                    reply.status,
                    reply.content_type,
                    reply.body.len(),
                    reply.headers,
                    reply.body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
        });

        (base, requests)
    }

    fn request_target(head: &str) -> Url {
        let target = head.split_whitespace().nth(1).unwrap();
        Url::parse("http://localhost").unwrap().join(target).unwrap()
    }

    const SEARCH_BODY: &str = r#"{"total":1,"issues":[{"id":"10001","key":"ABC-1","fields":{"summary":"Fix login","issuetype":{"name":"Bug"},"status":{"name":"Done"}}}]}"#;
    const VERSIONS_BODY: &str = r#"[{"name":"1.0","released":true,"archived":false},{"name":"1.1","released":false,"archived":false}]"#;

    #[tokio::test]
    async fn search_sends_query_and_basic_auth() {
        let (base, requests) = serve(vec![Reply::json("200 OK", SEARCH_BODY)]).await;

        let jql = "project = 'ABC' AND fixVersion = '1.0'";
        let issues = client(&base).search_issues(jql, 10).await.unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "ABC-1");
        assert_eq!(issues[0].fields.summary.as_deref(), Some("Fix login"));

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let target = request_target(&requests[0]);
        assert_eq!(target.path(), "/rest/api/2/search");
        let pairs: Vec<(String, String)> = target.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("jql".to_string(), jql.to_string()),
                ("maxResults".to_string(), "10".to_string()),
                ("fields".to_string(), SEARCH_FIELDS.to_string()),
            ]
        );
        // base64("user:token")
        assert!(requests[0]
            .to_ascii_lowercase()
            .contains("authorization: basic dxnlcjp0b2tlbg=="));
    }

    #[tokio::test]
    async fn retries_once_after_rate_limit() {
        let (base, requests) = serve(vec![
            Reply {
                status: "429 Too Many Requests",
                content_type: "text/plain",
                headers: "Retry-After: 0\r\n",
                body: "slow down",
            },
            Reply::json("200 OK", VERSIONS_BODY),
        ])
        .await;

        let versions = client(&base).project_versions("ABC").await.unwrap();

        let names: Vec<&str> = versions.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["1.0", "1.1"]);
        assert!(!versions[1].released);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            request_target(&requests[1]).path(),
            "/rest/api/2/project/ABC/versions"
        );
    }

    #[tokio::test]
    async fn second_rate_limit_is_reported() {
        let limited = || Reply {
            status: "429 Too Many Requests",
            content_type: "text/plain",
            headers: "Retry-After: 0\r\n",
            body: "slow down",
        };
        let (base, requests) = serve(vec![limited(), limited()]).await;

        let result = client(&base).project_versions("ABC").await;

        match result {
            Err(JiraError::Transport(e)) => {
                assert_eq!(e.code, 429);
                assert_eq!(e.message, "Too Many Requests");
                assert_eq!(e.body, None);
            }
            other => panic!("expected transport error, got {other:?}"),
        }
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn json_error_body_is_attached() {
        let body = r#"{"errorMessages":["The value 'XYZ' does not exist for the field 'project'."]}"#;
        let (base, _) = serve(vec![Reply::json("400 Bad Request", body)]).await;

        let err = client(&base).search_issues("project = 'XYZ'", 50).await.unwrap_err();

        match err {
            JiraError::Transport(e) => {
                assert_eq!(e.code, 400);
                assert_eq!(e.message, "Bad Request");
                assert_eq!(e.body.as_deref(), Some(body));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_error_body_is_dropped() {
        let (base, _) = serve(vec![Reply {
            status: "500 Internal Server Error",
            content_type: "text/html",
            headers: "",
            body: "<html><body>Oops</body></html>",
        }])
        .await;

        let err = client(&base).project_versions("ABC").await.unwrap_err();

        match err {
            JiraError::Transport(e) => {
                assert_eq!(e.code, 500);
                assert_eq!(e.message, "Internal Server Error");
                assert_eq!(e.body, None);
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let (base, _) = serve(vec![Reply::json("200 OK", "not json")]).await;

        let err = client(&base).search_issues("project = 'ABC'", 50).await.unwrap_err();

        assert!(matches!(err, JiraError::Decode { context: "search", .. }));
    }

    #[test]
    fn builds_search_endpoint() {
        let url = client("https://jira.example.com").endpoint(&["search"]).unwrap();
        assert_eq!(url.as_str(), "https://jira.example.com/rest/api/2/search");
    }

    #[test]
    fn keeps_context_path() {
        let url = client("https://example.com/jira/")
            .endpoint(&["project", "ABC", "versions"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/jira/rest/api/2/project/ABC/versions"
        );
    }

    #[test]
    fn encodes_path_segments() {
        let url = client("https://jira.example.com")
            .endpoint(&["project", "A B/C", "versions"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://jira.example.com/rest/api/2/project/A%20B%2FC/versions"
        );
    }

    #[test]
    fn rejects_cannot_be_a_base_url() {
        let result = client("mailto:jira@example.com").endpoint(&["search"]);
        assert!(matches!(result, Err(JiraError::InvalidBaseUrl { .. })));
    }
}
