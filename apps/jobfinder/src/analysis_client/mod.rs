//! Analysis client — the only place that talks to the job-finder backend.
//!
//! Three operations (resume analysis, text analysis, job search) plus a health
//! probe. Every exchange is classified into a `CallOutcome`; nothing is retried
//! here, a failed call surfaces immediately.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AnalysisResult, JobSearchResults};
use crate::upload::ResumeFile;

pub mod outcome;

pub use outcome::CallOutcome;

pub const ANALYZE_RESUME_PATH: &str = "/api/analyze-resume";
pub const ANALYZE_TEXT_PATH: &str = "/api/analyze-text";
pub const SEARCH_JOBS_PATH: &str = "/api/search-jobs-simple";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeTextRequest<'a> {
    search_text: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchJobsRequest<'a> {
    keywords: &'a str,
    location: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeTextPayload {
    analysis: AnalysisResult,
}

/// The backend seam. `SearchOrchestrator` holds an `Arc<dyn JobBackend>`.
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn analyze_resume(&self, resume: &ResumeFile) -> CallOutcome<JobSearchResults>;

    async fn analyze_text(&self, query: &str) -> CallOutcome<AnalysisResult>;

    async fn search_jobs(&self, keywords: &str, location: &str) -> CallOutcome<JobSearchResults>;

    async fn health(&self) -> CallOutcome<HealthStatus>;
}

/// `JobBackend` over HTTP/JSON. No local timeout: a hung call stays pending.
#[derive(Clone)]
pub struct HttpJobBackend {
    client: Client,
    base_url: String,
    host: String,
    port: u16,
}

impl HttpJobBackend {
    pub fn new(base_url: &Url) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            host: base_url.host_str().unwrap_or("localhost").to_string(),
            port: base_url.port_or_known_default().unwrap_or(80),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and classifies a `{success, ...}` envelope.
    async fn exchange<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> CallOutcome<T> {
        debug!("POST {path}");

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => return self.transport_failure(e, path),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("{path} returned 404");
            return CallOutcome::NotFound;
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return self.transport_failure(e, path),
        };

        classify_envelope(status, &body, path)
    }

    fn transport_failure<T>(&self, error: reqwest::Error, path: &str) -> CallOutcome<T> {
        if error.is_connect() {
            warn!(
                "{path}: cannot connect to {}:{}: {error}",
                self.host, self.port
            );
            CallOutcome::Unreachable {
                host: self.host.clone(),
                port: self.port,
            }
        } else {
            warn!("{path}: transport error: {error}");
            CallOutcome::Unknown {
                detail: error.to_string(),
            }
        }
    }
}

/// Classifies a response body that follows the backend's `{success, ...}` convention.
fn classify_envelope<T: DeserializeOwned>(status: StatusCode, body: &str, path: &str) -> CallOutcome<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!("{path} returned {status} with a non-JSON body: {e}");
            return CallOutcome::Unknown {
                detail: format!("HTTP {status}: unreadable response"),
            };
        }
    };

    match value.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let message = ["error", "message"]
                .iter()
                .find_map(|k| value.get(*k).and_then(Value::as_str))
                .map(str::to_string);
            warn!("{path} rejected the request: {message:?}");
            CallOutcome::ServerRejected { message }
        }
        Some(true) if status.is_success() => match serde_json::from_value::<T>(value) {
            Ok(payload) => CallOutcome::Ok(payload),
            Err(e) => {
                warn!("{path} reported success with a malformed payload: {e}");
                CallOutcome::Unknown {
                    detail: format!("malformed payload: {e}"),
                }
            }
        },
        _ => {
            warn!("{path} returned {status} without a usable success flag");
            CallOutcome::Unknown {
                detail: format!("HTTP {status}"),
            }
        }
    }
}

#[async_trait]
impl JobBackend for HttpJobBackend {
    async fn analyze_resume(&self, resume: &ResumeFile) -> CallOutcome<JobSearchResults> {
        let part = Part::bytes(resume.bytes.to_vec())
            .file_name(resume.file_name.clone())
            .mime_str(resume.kind.mime());
        let part = match part {
            Ok(p) => p,
            Err(e) => {
                return CallOutcome::Unknown {
                    detail: e.to_string(),
                }
            }
        };
        let form = Form::new().part(RESUME_FIELD, part);

        let request = self
            .client
            .post(self.endpoint(ANALYZE_RESUME_PATH))
            .multipart(form);
        self.exchange(request, ANALYZE_RESUME_PATH).await
    }

    async fn analyze_text(&self, query: &str) -> CallOutcome<AnalysisResult> {
        let request = self
            .client
            .post(self.endpoint(ANALYZE_TEXT_PATH))
            .json(&AnalyzeTextRequest { search_text: query });
        self.exchange::<AnalyzeTextPayload>(request, ANALYZE_TEXT_PATH)
            .await
            .map(|payload| payload.analysis)
    }

    async fn search_jobs(&self, keywords: &str, location: &str) -> CallOutcome<JobSearchResults> {
        let request = self
            .client
            .post(self.endpoint(SEARCH_JOBS_PATH))
            .json(&SearchJobsRequest { keywords, location });
        self.exchange(request, SEARCH_JOBS_PATH).await
    }

    async fn health(&self) -> CallOutcome<HealthStatus> {
        let response = match self.client.get(self.endpoint(HEALTH_PATH)).send().await {
            Ok(r) => r,
            Err(e) => return self.transport_failure(e, HEALTH_PATH),
        };

        match response.status() {
            StatusCode::NOT_FOUND => CallOutcome::NotFound,
            status if status.is_success() => match response.json::<HealthStatus>().await {
                Ok(health) => CallOutcome::Ok(health),
                Err(e) => CallOutcome::Unknown {
                    detail: e.to_string(),
                },
            },
            status => CallOutcome::Unknown {
                detail: format!("HTTP {status}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::outcome::OutcomeKind;
    use super::*;
    use crate::upload::ResumeKind;
    use axum::extract::Multipart;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use bytes::Bytes;
    use serde_json::json;

    async fn spawn_backend(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn backend(url: &Url) -> HttpJobBackend {
        HttpJobBackend::new(url).unwrap()
    }

    fn resume() -> ResumeFile {
        ResumeFile {
            file_name: "resume.pdf".to_string(),
            kind: ResumeKind::Pdf,
            bytes: Bytes::from_static(b"%PDF-1.4 fake resume"),
        }
    }

    async fn echo_resume(mut multipart: Multipart) -> Json<Value> {
        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() != Some("resume") {
                continue;
            }
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field.bytes().await.unwrap();
            return Json(json!({
                "success": true,
                "jobs": [{ "title": "Rust Engineer", "company": "TechCorp Solutions", "location": "Remote" }],
                "search_keywords": format!("{file_name}|{content_type}|{}", data.len()),
                "total_found": 12
            }));
        }
        Json(json!({ "success": false, "error": "missing resume field" }))
    }

    async fn echo_search(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "success": true,
            "jobs": [],
            "search_keywords": format!("{}|{}", body["keywords"].as_str().unwrap(), body["location"].as_str().unwrap())
        }))
    }

    #[tokio::test]
    async fn test_analyze_resume_sends_multipart_resume_field() {
        let url = spawn_backend(Router::new().route(ANALYZE_RESUME_PATH, post(echo_resume))).await;

        let outcome = backend(&url).analyze_resume(&resume()).await;

        let CallOutcome::Ok(results) = outcome else {
            panic!("expected Ok, got {outcome:?}");
        };
        assert_eq!(results.jobs.len(), 1);
        assert_eq!(results.total_found, Some(12));
        assert_eq!(
            results.search_keywords.as_deref(),
            Some("resume.pdf|application/pdf|20")
        );
    }

    #[tokio::test]
    async fn test_search_jobs_posts_keywords_and_location() {
        let url = spawn_backend(Router::new().route(SEARCH_JOBS_PATH, post(echo_search))).await;

        let outcome = backend(&url).search_jobs("react developer", "remote").await;

        let CallOutcome::Ok(results) = outcome else {
            panic!("expected Ok, got {outcome:?}");
        };
        assert_eq!(results.search_keywords.as_deref(), Some("react developer|remote"));
        assert!(results.total_found.is_none());
    }

    #[tokio::test]
    async fn test_analyze_text_posts_search_text() {
        let router = Router::new().route(
            ANALYZE_TEXT_PATH,
            post(|Json(body): Json<Value>| async move {
                let remote = body["search_text"].as_str().unwrap().contains("remote");
                Json(json!({
                    "success": true,
                    "analysis": {
                        "predicted_roles": ["React Developer"],
                        "mentioned_skills": ["react"],
                        "work_preferences": { "remote_preferred": remote },
                        "confidence": 0.9
                    }
                }))
            }),
        );
        let url = spawn_backend(router).await;

        let outcome = backend(&url).analyze_text("remote React developer").await;

        let CallOutcome::Ok(analysis) = outcome else {
            panic!("expected Ok, got {outcome:?}");
        };
        assert!(analysis.work_preferences.remote_preferred);
        assert_eq!(analysis.predicted_roles, vec!["React Developer"]);
    }

    #[tokio::test]
    async fn test_missing_route_is_not_found() {
        let url = spawn_backend(Router::new()).await;

        let outcome = backend(&url).analyze_resume(&resume()).await;
        assert_eq!(outcome.kind(), OutcomeKind::NotFound);
    }

    #[tokio::test]
    async fn test_success_false_is_server_rejected_with_message() {
        let router = Router::new().route(
            SEARCH_JOBS_PATH,
            post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "keywords required" })),
                )
            }),
        );
        let url = spawn_backend(router).await;

        let outcome = backend(&url).search_jobs("", "").await;
        assert_eq!(
            outcome,
            CallOutcome::ServerRejected {
                message: Some("keywords required".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_success_without_analysis_is_unknown() {
        let router = Router::new().route(
            ANALYZE_TEXT_PATH,
            post(|| async { Json(json!({ "success": true })) }),
        );
        let url = spawn_backend(router).await;

        let outcome = backend(&url).analyze_text("designer").await;
        assert_eq!(outcome.kind(), OutcomeKind::Unknown);
    }

    #[tokio::test]
    async fn test_server_error_with_plain_body_is_unknown() {
        let router = Router::new().route(
            ANALYZE_TEXT_PATH,
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = spawn_backend(router).await;

        let outcome = backend(&url).analyze_text("nurse").await;
        assert_eq!(outcome.kind(), OutcomeKind::Unknown);
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

        let outcome = backend(&url).search_jobs("rust", "").await;
        assert_eq!(
            outcome,
            CallOutcome::Unreachable {
                host: "127.0.0.1".to_string(),
                port
            }
        );
    }

    #[tokio::test]
    async fn test_health_reads_status() {
        let router = Router::new().route(
            HEALTH_PATH,
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "message": "AI Job Finder API is running",
                    "version": "1.0.0"
                }))
            }),
        );
        let url = spawn_backend(router).await;

        let CallOutcome::Ok(health) = backend(&url).health().await else {
            panic!("expected healthy backend");
        };
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_envelope_success_true_with_error_status_is_unknown() {
        let outcome: CallOutcome<JobSearchResults> = classify_envelope(
            StatusCode::BAD_GATEWAY,
            r#"{"success": true, "jobs": []}"#,
            SEARCH_JOBS_PATH,
        );
        assert_eq!(outcome.kind(), OutcomeKind::Unknown);
    }

    #[test]
    fn test_envelope_with_null_tags_still_decodes() {
        let body = r#"{"success": true, "jobs": [
            {"title": "A", "company": "B", "location": "Remote", "tags": ["x"]},
            {"title": "C", "company": "D", "location": "Remote", "tags": null}
        ]}"#;
        let outcome: CallOutcome<JobSearchResults> =
            classify_envelope(StatusCode::OK, body, SEARCH_JOBS_PATH);

        let CallOutcome::Ok(results) = outcome else {
            panic!("expected Ok, got {outcome:?}");
        };
        assert_eq!(results.jobs.len(), 2);
        assert!(results.jobs[1].tags.is_empty());
    }

    #[test]
    fn test_envelope_rejection_falls_back_to_message_field() {
        let outcome: CallOutcome<JobSearchResults> = classify_envelope(
            StatusCode::OK,
            r#"{"success": false, "message": "no text extracted"}"#,
            ANALYZE_RESUME_PATH,
        );
        assert_eq!(
            outcome,
            CallOutcome::ServerRejected {
                message: Some("no text extracted".to_string())
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let url = Url::parse("http://localhost:5000/").unwrap();
        let backend = backend(&url);
        assert_eq!(
            backend.endpoint(SEARCH_JOBS_PATH),
            "http://localhost:5000/api/search-jobs-simple"
        );
        assert_eq!(backend.port, 5000);
    }
}
