//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod analysis_service;
mod credential_store;

pub use analysis_service::{
    AnalysisError, AnalysisServicePort, BatchAnalysisRequest, SingleAnalysisRequest,
    ANALYSIS_FAILED_MESSAGE, BATCH_FAILED_MESSAGE, CREDENTIAL_FAILED_MESSAGE,
    SERVER_ERROR_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
pub use credential_store::{CredentialError, CredentialStorePort};
