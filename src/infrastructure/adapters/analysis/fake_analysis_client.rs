//! Fake Analysis Client - 用于测试的分析服务客户端
//!
//! 返回预设结果并记录每次调用，不发起网络请求

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{
    AnalysisError, AnalysisServicePort, BatchAnalysisRequest, SingleAnalysisRequest,
};
use crate::domain::ranking::{AnalysisResult, BatchResult};
use crate::domain::submission::ResumeFile;

/// Fake Analysis Client 配置
#[derive(Debug, Clone)]
pub struct FakeAnalysisClientConfig {
    pub single: Result<AnalysisResult, AnalysisError>,
    pub batch: Result<BatchResult, AnalysisError>,
    pub set_credential: Result<(), AnalysisError>,
    pub upload: Result<String, AnalysisError>,
}

impl Default for FakeAnalysisClientConfig {
    fn default() -> Self {
        Self {
            single: Ok(AnalysisResult::default()),
            batch: Ok(BatchResult::default()),
            set_credential: Ok(()),
            upload: Ok("File uploaded successfully".to_string()),
        }
    }
}

/// 记录的调用（凭证注册只记录发生过，不记录值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Single {
        filename: String,
        job_description: Option<String>,
        credential: Option<String>,
    },
    Batch {
        files: Vec<String>,
        job_description: String,
        credential: Option<String>,
    },
    SetCredential,
    Upload {
        filename: String,
    },
}

/// Fake Analysis Client
pub struct FakeAnalysisClient {
    config: FakeAnalysisClientConfig,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeAnalysisClient {
    pub fn new(config: FakeAnalysisClientConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 按发生顺序返回已记录的调用
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl AnalysisServicePort for FakeAnalysisClient {
    async fn analyze_single(
        &self,
        request: SingleAnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.record(RecordedCall::Single {
            filename: request.file.filename().to_string(),
            job_description: request.job_description,
            credential: request.credential,
        });
        self.config.single.clone()
    }

    async fn analyze_batch(
        &self,
        request: BatchAnalysisRequest,
    ) -> Result<BatchResult, AnalysisError> {
        self.record(RecordedCall::Batch {
            files: request
                .files
                .iter()
                .map(|file| file.filename().to_string())
                .collect(),
            job_description: request.job_description,
            credential: request.credential,
        });
        self.config.batch.clone()
    }

    async fn set_credential(&self, _value: &str) -> Result<(), AnalysisError> {
        self.record(RecordedCall::SetCredential);
        self.config.set_credential.clone()
    }

    async fn upload(&self, file: ResumeFile) -> Result<String, AnalysisError> {
        self.record(RecordedCall::Upload {
            filename: file.filename().to_string(),
        });
        self.config.upload.clone()
    }
}
