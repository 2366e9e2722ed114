//! Workflow Controller - 有状态协调者
//!
//! 持有当前提交、请求生命周期、展开行和凭证子状态。
//! 用户操作作为封闭的 UserAction 集合分发进来。

use std::sync::Arc;
use uuid::Uuid;

use super::credential::CredentialState;
use super::state::{transition, AnalysisOutcome, WorkflowEvent, WorkflowState};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AnalysisServicePort, BatchAnalysisRequest, CredentialStorePort, SingleAnalysisRequest,
};
use crate::domain::ranking::{job_description_preview, present, toggle_expand, RowView};
use crate::domain::submission::{ResumeFile, Submission, SubmissionValidator, ValidationError};

/// 控制器配置
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// 确认凭证时先调用 /set-api-key
    pub register_credential_remotely: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            register_credential_remotely: true,
        }
    }
}

/// 用户操作
#[derive(Debug, Clone)]
pub enum UserAction {
    Submit(Submission),
    ToggleRow(usize),
    ShowCredentialForm,
    EditCredential(String),
    ConfirmCredential,
    ClearCredential,
}

/// 工作流控制器
///
/// 每个实例同一时刻最多一个未完成请求
pub struct WorkflowController {
    analysis: Arc<dyn AnalysisServicePort>,
    credentials: Arc<dyn CredentialStorePort>,
    validator: SubmissionValidator,
    config: WorkflowConfig,
    state: WorkflowState,
    expanded: Option<usize>,
    job_description: Option<String>,
    credential: CredentialState,
}

impl WorkflowController {
    /// 创建控制器，读取一次已保存的凭证
    pub fn new(
        analysis: Arc<dyn AnalysisServicePort>,
        credentials: Arc<dyn CredentialStorePort>,
        validator: SubmissionValidator,
        config: WorkflowConfig,
    ) -> Result<Self, ApplicationError> {
        let saved = credentials.load()?;
        tracing::debug!(credential_set = saved.is_some(), "Workflow controller initialized");

        Ok(Self {
            analysis,
            credentials,
            validator,
            config,
            state: WorkflowState::Idle,
            expanded: None,
            job_description: None,
            credential: CredentialState::from_saved(saved),
        })
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn expanded_row(&self) -> Option<usize> {
        self.expanded
    }

    pub fn credential(&self) -> &CredentialState {
        &self.credential
    }

    /// 批量结果的行视图，非批量成功状态返回 None
    pub fn rows(&self) -> Option<Vec<RowView>> {
        self.state.batch_result().map(present)
    }

    /// 最近一次提交的职位描述预览
    pub fn job_description_display(&self) -> String {
        job_description_preview(self.job_description.as_deref())
    }

    pub async fn dispatch(&mut self, action: UserAction) -> Result<(), ApplicationError> {
        match action {
            UserAction::Submit(submission) => self.submit(submission).await.map(|_| ()),
            UserAction::ToggleRow(index) => self.toggle_row(index).map(|_| ()),
            UserAction::ShowCredentialForm => {
                self.credential.toggle_form();
                Ok(())
            }
            UserAction::EditCredential(value) => {
                self.credential.set_draft(value);
                Ok(())
            }
            UserAction::ConfirmCredential => self.confirm_credential().await,
            UserAction::ClearCredential => self.clear_credential(),
        }
    }

    /// 提交分析
    ///
    /// 忙碌时拒绝；校验和请求失败都记录在 Failure 状态中而不是返回 Err
    pub async fn submit(&mut self, submission: Submission) -> Result<&WorkflowState, ApplicationError> {
        let attempt_id = Uuid::new_v4();
        let mode = submission.mode();

        self.apply(WorkflowEvent::Submit)?;
        self.expanded = None;
        self.job_description = submission.job_description().map(str::to_string);

        if let Err(err) = self.validator.validate(&submission) {
            tracing::warn!(
                attempt_id = %attempt_id,
                mode = mode.as_str(),
                error = %err,
                "Submission rejected before request"
            );
            self.apply(WorkflowEvent::ValidationFailed(err.to_string()))?;
            return Ok(&self.state);
        }
        self.apply(WorkflowEvent::ValidationPassed)?;

        let credential = self.credential.outgoing();
        tracing::info!(
            attempt_id = %attempt_id,
            mode = mode.as_str(),
            files = submission.file_count(),
            with_credential = credential.is_some(),
            "Analysis request started"
        );

        match self.request(submission, credential.clone()).await {
            Ok(outcome) => {
                self.apply(WorkflowEvent::RequestSucceeded(outcome))?;
                tracing::info!(attempt_id = %attempt_id, "Analysis request succeeded");
                if let Some(value) = credential {
                    self.persist_used_credential(value);
                }
            }
            Err(err) => {
                tracing::warn!(attempt_id = %attempt_id, error = %err, "Analysis request failed");
                self.apply(WorkflowEvent::RequestFailed(err.to_string()))?;
            }
        }

        Ok(&self.state)
    }

    /// 切换展开行，只在批量结果上有效
    pub fn toggle_row(&mut self, index: usize) -> Result<Option<usize>, ApplicationError> {
        let len = self
            .state
            .batch_result()
            .map(|batch| batch.len())
            .ok_or_else(|| ApplicationError::invalid_state("no ranked results to expand"))?;
        if index >= len {
            return Err(ApplicationError::invalid_state(format!(
                "row {} out of range ({} results)",
                index, len
            )));
        }
        self.expanded = toggle_expand(self.expanded, index);
        Ok(self.expanded)
    }

    /// 确认凭证：可选的服务端注册，成功后本地保存
    ///
    /// 服务端拒绝时不触碰已保存的凭证
    pub async fn confirm_credential(&mut self) -> Result<(), ApplicationError> {
        let draft = self.credential.draft().to_string();
        if draft.is_empty() {
            let err = ApplicationError::MissingCredential;
            self.credential.set_error(err.to_string());
            return Err(err);
        }

        if self.config.register_credential_remotely {
            if let Err(err) = self.analysis.set_credential(&draft).await {
                let err = ApplicationError::CredentialRejected(err.message().to_string());
                tracing::warn!(error = %err, "Credential rejected by service");
                self.credential.set_error(err.to_string());
                return Err(err);
            }
        }

        if let Err(err) = self.credentials.save(&draft) {
            let err = ApplicationError::from(err);
            self.credential.set_error(err.to_string());
            return Err(err);
        }
        self.credential.mark_saved(draft);
        tracing::info!("Credential saved");
        Ok(())
    }

    pub fn clear_credential(&mut self) -> Result<(), ApplicationError> {
        self.credentials.clear()?;
        self.credential.mark_cleared();
        tracing::info!("Credential cleared");
        Ok(())
    }

    /// 单文件上传，不经过状态机
    pub async fn upload(&self, file: ResumeFile) -> Result<String, ApplicationError> {
        self.validator.validate_single(Some(&file))?;
        tracing::info!(filename = %file.filename(), size = file.size(), "Uploading resume");
        Ok(self.analysis.upload(file).await?)
    }

    async fn request(
        &self,
        submission: Submission,
        credential: Option<String>,
    ) -> Result<AnalysisOutcome, ApplicationError> {
        match submission {
            Submission::Single {
                file: Some(file),
                job_description,
            } => {
                let request = SingleAnalysisRequest {
                    file,
                    job_description: job_description.filter(|text| !text.is_empty()),
                    credential,
                };
                let result = self.analysis.analyze_single(request).await?;
                Ok(AnalysisOutcome::Single(result))
            }
            Submission::Single { file: None, .. } => {
                Err(ValidationError::NoFileSelected.into())
            }
            Submission::Batch {
                files,
                job_description,
            } => {
                let request = BatchAnalysisRequest {
                    files,
                    job_description,
                    credential,
                };
                let result = self.analysis.analyze_batch(request).await?;
                Ok(AnalysisOutcome::Batch(result))
            }
        }
    }

    /// 请求成功后保存用过的凭证；保存失败不影响已得到的结果
    fn persist_used_credential(&mut self, value: String) {
        match self.credentials.save(&value) {
            Ok(()) => {
                self.credential.mark_used(value);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to persist credential after request");
                self.credential.set_error(ApplicationError::from(err).to_string());
            }
        }
    }

    fn apply(&mut self, event: WorkflowEvent) -> Result<(), ApplicationError> {
        let event_name = event.name();
        let next = transition(&self.state, event)?;
        tracing::debug!(
            from = self.state.as_str(),
            to = next.as_str(),
            event = event_name,
            "Workflow transition"
        );
        self.state = next;
        Ok(())
    }
}
