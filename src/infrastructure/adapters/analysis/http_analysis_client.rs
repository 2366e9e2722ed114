//! HTTP Analysis Client - 调用远程简历分析服务
//!
//! 实现 AnalysisServicePort trait，通过 HTTP 调用评分服务
//!
//! 远程 API:
//! POST /analyze        multipart: resume, job_desc?, api_key?
//!                      200 {"data": {"skills": [...], "suggestions": "..."}}
//! POST /batch-analyze  multipart: resumes[] (1..N), job_desc, api_key?
//!                      200 {"results": [{"filename", "name"?, "skills", "score", "analysis"?}]}
//! POST /set-api-key    JSON {"api_key": "..."}
//! POST /upload         multipart: resume -> {"message"} / {"error"}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    AnalysisError, AnalysisServicePort, BatchAnalysisRequest, SingleAnalysisRequest,
    ANALYSIS_FAILED_MESSAGE, BATCH_FAILED_MESSAGE, CREDENTIAL_FAILED_MESSAGE,
    SERVER_ERROR_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
use crate::domain::ranking::{AnalysisResult, BatchResult};
use crate::domain::submission::ResumeFile;

const ANALYZE_PATH: &str = "/analyze";
const BATCH_ANALYZE_PATH: &str = "/batch-analyze";
const SET_API_KEY_PATH: &str = "/set-api-key";
const UPLOAD_PATH: &str = "/upload";

/// 设置凭证请求体 (JSON)
#[derive(Debug, Serialize)]
struct SetApiKeyRequest<'a> {
    api_key: &'a str,
}

/// /analyze 响应体
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    data: Option<AnalysisResult>,
}

/// /upload 响应体
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    message: String,
}

/// 服务端错误响应体
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// HTTP 分析客户端配置
#[derive(Debug, Clone)]
pub struct HttpAnalysisClientConfig {
    /// 分析服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpAnalysisClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpAnalysisClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 分析客户端
///
/// 每个操作只发一次请求，失败不重试
pub struct HttpAnalysisClient {
    client: Client,
    config: HttpAnalysisClientConfig,
}

impl HttpAnalysisClient {
    /// 创建新的 HTTP 分析客户端
    pub fn new(config: HttpAnalysisClientConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::AnalysisFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn file_part(file: &ResumeFile) -> Part {
        Part::bytes(file.bytes().to_vec()).file_name(file.filename().to_string())
    }

    /// 发送请求，传输层错误只记录日志并折叠为调用方给定的消息
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<Response, reqwest::Error> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(path = path, "Analysis service request timed out");
            } else if e.is_connect() {
                tracing::warn!(path = path, error = %e, "Cannot connect to analysis service");
            } else {
                tracing::warn!(path = path, error = %e, "Analysis service request failed");
            }
            e
        })
    }

    /// 读取错误响应中的 error 字段，缺失时使用通用消息
    async fn server_error(response: Response, fallback: &str) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body_len = body.len(), "Analysis service returned an error");

        serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[async_trait]
impl AnalysisServicePort for HttpAnalysisClient {
    async fn analyze_single(
        &self,
        request: SingleAnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let failed = || AnalysisError::AnalysisFailed(ANALYSIS_FAILED_MESSAGE.to_string());

        let mut form = Form::new().part("resume", Self::file_part(&request.file));
        if let Some(job_description) = request.job_description.filter(|text| !text.is_empty()) {
            form = form.text("job_desc", job_description);
        }
        if let Some(api_key) = request.credential.filter(|key| !key.is_empty()) {
            form = form.text("api_key", api_key);
        }

        tracing::debug!(
            url = %self.url(ANALYZE_PATH),
            filename = %request.file.filename(),
            size = request.file.size(),
            "Sending single analysis request"
        );

        let response = self
            .send(self.client.post(self.url(ANALYZE_PATH)).multipart(form), ANALYZE_PATH)
            .await
            .map_err(|_| failed())?;

        if !response.status().is_success() {
            let message = Self::server_error(response, ANALYSIS_FAILED_MESSAGE).await;
            return Err(AnalysisError::AnalysisFailed(message));
        }

        let body: AnalyzeResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Invalid analysis response");
            failed()
        })?;

        // 没有建议内容的响应不算成功
        let result = body
            .data
            .filter(|data| !data.suggestions.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Analysis response carried no suggestions");
                failed()
            })?;

        tracing::info!(skills = result.skills.len(), "Single analysis completed");
        Ok(result)
    }

    async fn analyze_batch(
        &self,
        request: BatchAnalysisRequest,
    ) -> Result<BatchResult, AnalysisError> {
        let failed = || AnalysisError::AnalysisFailed(BATCH_FAILED_MESSAGE.to_string());

        let mut form = Form::new();
        for file in &request.files {
            form = form.part("resumes[]", Self::file_part(file));
        }
        form = form.text("job_desc", request.job_description.clone());
        if let Some(api_key) = request.credential.filter(|key| !key.is_empty()) {
            form = form.text("api_key", api_key);
        }

        tracing::debug!(
            url = %self.url(BATCH_ANALYZE_PATH),
            files = request.files.len(),
            job_description_len = request.job_description.len(),
            "Sending batch analysis request"
        );

        let response = self
            .send(
                self.client.post(self.url(BATCH_ANALYZE_PATH)).multipart(form),
                BATCH_ANALYZE_PATH,
            )
            .await
            .map_err(|_| failed())?;

        // 批量模式不解析错误响应体
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Batch analysis returned an error");
            return Err(AnalysisError::AnalysisFailed(SERVER_ERROR_MESSAGE.to_string()));
        }

        let batch: BatchResult = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Invalid batch analysis response");
            failed()
        })?;

        tracing::info!(candidates = batch.len(), "Batch analysis completed");
        Ok(batch)
    }

    async fn set_credential(&self, value: &str) -> Result<(), AnalysisError> {
        let rejected = |message: String| AnalysisError::CredentialRejected(message);

        let response = self
            .send(
                self.client
                    .post(self.url(SET_API_KEY_PATH))
                    .json(&SetApiKeyRequest { api_key: value }),
                SET_API_KEY_PATH,
            )
            .await
            .map_err(|_| rejected(CREDENTIAL_FAILED_MESSAGE.to_string()))?;

        if !response.status().is_success() {
            let message = Self::server_error(response, CREDENTIAL_FAILED_MESSAGE).await;
            return Err(rejected(message));
        }

        tracing::info!("Credential registered with analysis service");
        Ok(())
    }

    async fn upload(&self, file: ResumeFile) -> Result<String, AnalysisError> {
        let failed = || AnalysisError::UploadFailed(UPLOAD_FAILED_MESSAGE.to_string());
        let form = Form::new().part("resume", Self::file_part(&file));

        let response = self
            .send(self.client.post(self.url(UPLOAD_PATH)).multipart(form), UPLOAD_PATH)
            .await
            .map_err(|_| failed())?;

        if !response.status().is_success() {
            let message = Self::server_error(response, UPLOAD_FAILED_MESSAGE).await;
            return Err(AnalysisError::UploadFailed(message));
        }

        let body: UploadResponse = response.json().await.map_err(|_| failed())?;
        tracing::info!(filename = %file.filename(), "Resume uploaded");
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn resume(name: &str) -> ResumeFile {
        ResumeFile::new(name, format!("contents of {}", name).into_bytes())
    }

    fn client_for(server: &mockito::Server) -> HttpAnalysisClient {
        HttpAnalysisClient::new(HttpAnalysisClientConfig::new(server.url()).with_timeout(5))
            .unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpAnalysisClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client =
            HttpAnalysisClient::new(HttpAnalysisClientConfig::new("http://example.com:9000/"))
                .unwrap();
        assert_eq!(client.url(BATCH_ANALYZE_PATH), "http://example.com:9000/batch-analyze");
    }

    #[tokio::test]
    async fn test_batch_success_preserves_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/batch-analyze")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("a.txt".to_string()),
                Matcher::Regex("b.txt".to_string()),
                Matcher::Regex("Rust backend role".to_string()),
                Matcher::Regex("abc123".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"filename": "b.txt", "skills": ["Go"], "score": 4},
                    {"filename": "a.txt", "name": "Ada", "skills": ["Rust", "Tokio"], "score": 9.5, "analysis": "Great fit"}
                ]}"#,
            )
            .create_async()
            .await;

        let batch = client_for(&server)
            .analyze_batch(BatchAnalysisRequest {
                files: vec![resume("a.txt"), resume("b.txt")],
                job_description: "Rust backend role".to_string(),
                credential: Some("abc123".to_string()),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.results[0].filename, "b.txt");
        assert_eq!(batch.results[1].display_name(), "Ada");
        assert_eq!(batch.results[1].score, 9.5);
    }

    #[tokio::test]
    async fn test_batch_error_ignores_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/batch-analyze")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "model crashed"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .analyze_batch(BatchAnalysisRequest {
                files: vec![resume("a.pdf")],
                job_description: "Analyst".to_string(),
                credential: None,
            })
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err,
            AnalysisError::AnalysisFailed("Server returned an error".to_string())
        );
    }

    #[tokio::test]
    async fn test_batch_unreachable_service() {
        let client = HttpAnalysisClient::new(
            HttpAnalysisClientConfig::new("http://127.0.0.1:1").with_timeout(5),
        )
        .unwrap();
        let err = client
            .analyze_batch(BatchAnalysisRequest {
                files: vec![resume("a.pdf")],
                job_description: "Analyst".to_string(),
                credential: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), BATCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_single_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r###"{"data": {"skills": ["Python", "SQL"], "suggestions": "## Tips\n- Add metrics"}}"###)
            .create_async()
            .await;

        let result = client_for(&server)
            .analyze_single(SingleAnalysisRequest {
                file: resume("cv.pdf"),
                job_description: None,
                credential: None,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.skills, vec!["Python", "SQL"]);
        assert!(result.suggestions.starts_with("## Tips"));
    }

    #[tokio::test]
    async fn test_single_without_data_is_a_failure() {
        for body in [
            r#"{"message": "done"}"#,
            r#"{"data": null}"#,
            r#"{"data": {"skills": ["Python"]}}"#,
        ] {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/analyze")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body)
                .create_async()
                .await;

            let err = client_for(&server)
                .analyze_single(SingleAnalysisRequest {
                    file: resume("cv.pdf"),
                    job_description: None,
                    credential: None,
                })
                .await
                .unwrap_err();

            mock.assert_async().await;
            assert_eq!(
                err,
                AnalysisError::AnalysisFailed(ANALYSIS_FAILED_MESSAGE.to_string())
            );
        }
    }

    #[tokio::test]
    async fn test_single_error_surfaces_server_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "File type not allowed"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .analyze_single(SingleAnalysisRequest {
                file: resume("cv.pdf"),
                job_description: Some("Rust".to_string()),
                credential: None,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::AnalysisFailed("File type not allowed".to_string())
        );
    }

    #[tokio::test]
    async fn test_single_error_without_body_is_generic() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client_for(&server)
            .analyze_single(SingleAnalysisRequest {
                file: resume("cv.pdf"),
                job_description: None,
                credential: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), ANALYSIS_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_set_credential_sends_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/set-api-key")
            .match_body(Matcher::Json(serde_json::json!({"api_key": "abc123"})))
            .with_status(200)
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        client_for(&server).set_credential("abc123").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_set_credential_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/set-api-key")
            .with_status(401)
            .create_async()
            .await;

        let err = client_for(&server).set_credential("bad").await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::CredentialRejected(CREDENTIAL_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_upload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "File uploaded successfully", "filename": "cv.pdf"}"#)
            .create_async()
            .await;

        let message = client_for(&server).upload(resume("cv.pdf")).await.unwrap();
        assert_eq!(message, "File uploaded successfully");
    }

    #[tokio::test]
    async fn test_upload_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "No selected file"}"#)
            .create_async()
            .await;

        let err = client_for(&server).upload(resume("cv.pdf")).await.unwrap_err();
        assert_eq!(err, AnalysisError::UploadFailed("No selected file".to_string()));
    }
}
