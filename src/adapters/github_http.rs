//! GitHub REST client implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, GitHubApiConfig, Issue, RelayConfig, RepoPath, RepoSlug};
use crate::domain::encode_content;
use crate::ports::{FileWrite, GitHub, RemoteFile};

const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const ISSUE_PAGE_SIZE: &str = "20";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Blocking HTTP client for one repository's issues and contents.
#[derive(Clone)]
pub struct HttpGitHubClient {
    api_url: Url,
    repository: RepoSlug,
    client: Client,
}

impl std::fmt::Debug for HttpGitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGitHubClient")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpGitHubClient {
    /// Create a client authenticated with `token`.
    pub fn new(token: &str, repository: RepoSlug, config: &GitHubApiConfig) -> Result<Self, AppError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::config_error("Token contains characters not allowed in a header"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(GITHUB_API_VERSION_HEADER, HeaderValue::from_static(GITHUB_API_VERSION));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_url: config.api_url.clone(), repository, client })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, AppError> {
        Self::new(&config.token, config.repository.clone(), &config.github)
    }

    /// `<api_url>/repos/<owner>/<name>/<segments...>`, each segment percent-encoded.
    fn endpoint<'a, I>(&self, segments: I) -> Result<Url, AppError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config_error(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(["repos", self.repository.owner(), self.repository.name()])
            .extend(segments);
        Ok(url)
    }

    fn contents_url(&self, path: &RepoPath) -> Result<Url, AppError> {
        self.endpoint(std::iter::once("contents").chain(path.segments()))
    }

    fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, AppError> {
        request
            .send()
            .map_err(|e| AppError::Http { operation: operation.to_string(), details: e.to_string() })
    }

    fn ensure_success(operation: &str, response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().unwrap_or_default();
        Err(AppError::GitHubApi {
            operation: operation.to_string(),
            status: status.as_u16(),
            body: error_message(&text),
        })
    }

    fn parse_json<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, AppError> {
        response.json().map_err(|e| AppError::UnexpectedResponse {
            operation: operation.to_string(),
            details: e.to_string(),
        })
    }
}

/// Prefer GitHub's `{"message": ...}` field; fall back to the raw body, truncated.
fn error_message(text: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    if let Ok(body) = serde_json::from_str::<ErrorBody>(text) {
        return body.message;
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<serde_json::Value>),
    Entry(ContentsEntry),
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    #[serde(rename = "type")]
    kind: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeleteContentsRequest<'a> {
    message: &'a str,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct IssueStateRequest<'a> {
    state: &'a str,
}

impl GitHub for HttpGitHubClient {
    fn latest_labeled_issue(&self, label: &str) -> Result<Option<Issue>, AppError> {
        let operation = "list issues";
        let mut url = self.endpoint(["issues"])?;
        url.query_pairs_mut()
            .append_pair("labels", label)
            .append_pair("state", "open")
            .append_pair("sort", "created")
            .append_pair("direction", "desc")
            .append_pair("per_page", ISSUE_PAGE_SIZE);

        tracing::debug!(%url, "listing labeled issues");
        let response = self.send(operation, self.client.get(url))?;
        let response = Self::ensure_success(operation, response)?;
        let issues: Vec<Issue> = Self::parse_json(operation, response)?;

        Ok(issues.into_iter().find(|issue| !issue.is_pull_request()))
    }

    fn get_file(&self, path: &RepoPath) -> Result<Option<RemoteFile>, AppError> {
        let operation = "get file";
        let url = self.contents_url(path)?;

        tracing::debug!(%url, "looking up file");
        let response = self.send(operation, self.client.get(url))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(operation, response)?;

        match Self::parse_json::<ContentsResponse>(operation, response)? {
            ContentsResponse::Listing(_) => Err(AppError::NotAFile(path.to_string())),
            ContentsResponse::Entry(entry) if entry.kind == "dir" => {
                Err(AppError::NotAFile(path.to_string()))
            }
            ContentsResponse::Entry(entry) => Ok(Some(RemoteFile { sha: entry.sha })),
        }
    }

    fn put_file(&self, path: &RepoPath, write: &FileWrite) -> Result<(), AppError> {
        let operation = "put file";
        let url = self.contents_url(path)?;
        let body = PutContentsRequest {
            message: &write.message,
            content: encode_content(&write.content),
            sha: write.sha.as_deref(),
        };

        tracing::debug!(%url, overwrite = write.sha.is_some(), "writing file");
        let response = self.send(operation, self.client.put(url).json(&body))?;
        Self::ensure_success(operation, response)?;
        Ok(())
    }

    fn delete_file(&self, path: &RepoPath, message: &str, sha: &str) -> Result<(), AppError> {
        let operation = "delete file";
        let url = self.contents_url(path)?;
        let body = DeleteContentsRequest { message, sha };

        tracing::debug!(%url, "deleting file");
        let response = self.send(operation, self.client.delete(url).json(&body))?;
        Self::ensure_success(operation, response)?;
        Ok(())
    }

    fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<(), AppError> {
        let operation = "create issue comment";
        let number = issue_number.to_string();
        let url = self.endpoint(["issues", number.as_str(), "comments"])?;

        tracing::debug!(%url, "posting comment");
        let response = self.send(operation, self.client.post(url).json(&CommentRequest { body }))?;
        Self::ensure_success(operation, response)?;
        Ok(())
    }

    fn close_issue(&self, issue_number: u64) -> Result<(), AppError> {
        let operation = "close issue";
        let number = issue_number.to_string();
        let url = self.endpoint(["issues", number.as_str()])?;

        tracing::debug!(%url, "closing issue");
        let request = self.client.patch(url).json(&IssueStateRequest { state: "closed" });
        let response = self.send(operation, request)?;
        Self::ensure_success(operation, response)?;
        Ok(())
    }
}
