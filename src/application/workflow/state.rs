//! Workflow State Machine
//!
//! Idle → Validating → InFlight → {Success, Failure}
//! Success / Failure 在下一次 Submit 时重新进入 Validating

use crate::application::error::ApplicationError;
use crate::domain::ranking::{AnalysisResult, BatchResult};

/// 成功的分析结果，按模式区分
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Single(AnalysisResult),
    Batch(BatchResult),
}

/// 请求生命周期状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Success(AnalysisOutcome),
    Failure(String),
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Validating => "validating",
            WorkflowState::InFlight => "in_flight",
            WorkflowState::Success(_) => "success",
            WorkflowState::Failure(_) => "failure",
        }
    }

    /// 是否允许发起新的提交
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            WorkflowState::Idle | WorkflowState::Success(_) | WorkflowState::Failure(_)
        )
    }

    pub fn is_busy(&self) -> bool {
        !self.accepts_submit()
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WorkflowState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn batch_result(&self) -> Option<&BatchResult> {
        match self {
            WorkflowState::Success(AnalysisOutcome::Batch(batch)) => Some(batch),
            _ => None,
        }
    }

    pub fn single_result(&self) -> Option<&AnalysisResult> {
        match self {
            WorkflowState::Success(AnalysisOutcome::Single(result)) => Some(result),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 生命周期事件
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    Submit,
    ValidationFailed(String),
    ValidationPassed,
    RequestSucceeded(AnalysisOutcome),
    RequestFailed(String),
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::Submit => "submit",
            WorkflowEvent::ValidationFailed(_) => "validation_failed",
            WorkflowEvent::ValidationPassed => "validation_passed",
            WorkflowEvent::RequestSucceeded(_) => "request_succeeded",
            WorkflowEvent::RequestFailed(_) => "request_failed",
        }
    }
}

/// 状态迁移
///
/// 未定义的 (状态, 事件) 组合返回 InvalidState，原状态保持不变
pub fn transition(
    state: &WorkflowState,
    event: WorkflowEvent,
) -> Result<WorkflowState, ApplicationError> {
    match (state, event) {
        (s, WorkflowEvent::Submit) if s.accepts_submit() => Ok(WorkflowState::Validating),
        (WorkflowState::Validating, WorkflowEvent::ValidationFailed(message)) => {
            Ok(WorkflowState::Failure(message))
        }
        (WorkflowState::Validating, WorkflowEvent::ValidationPassed) => Ok(WorkflowState::InFlight),
        (WorkflowState::InFlight, WorkflowEvent::RequestSucceeded(outcome)) => {
            Ok(WorkflowState::Success(outcome))
        }
        (WorkflowState::InFlight, WorkflowEvent::RequestFailed(message)) => {
            Ok(WorkflowState::Failure(message))
        }
        (s, WorkflowEvent::Submit) => Err(ApplicationError::invalid_state(format!(
            "an analysis is already {}",
            s.as_str()
        ))),
        (s, event) => Err(ApplicationError::invalid_state(format!(
            "{} cannot handle {}",
            s.as_str(),
            event.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_outcome() -> AnalysisOutcome {
        AnalysisOutcome::Batch(BatchResult::default())
    }

    #[test]
    fn test_happy_path() {
        let state = WorkflowState::default();
        let state = transition(&state, WorkflowEvent::Submit).unwrap();
        assert_eq!(state, WorkflowState::Validating);
        let state = transition(&state, WorkflowEvent::ValidationPassed).unwrap();
        assert_eq!(state, WorkflowState::InFlight);
        let state = transition(&state, WorkflowEvent::RequestSucceeded(batch_outcome())).unwrap();
        assert!(state.batch_result().is_some());
    }

    #[test]
    fn test_validation_failure_skips_in_flight() {
        let state = transition(&WorkflowState::Idle, WorkflowEvent::Submit).unwrap();
        let state = transition(
            &state,
            WorkflowEvent::ValidationFailed("Please upload a resume file".to_string()),
        )
        .unwrap();
        assert_eq!(state.error_message(), Some("Please upload a resume file"));
    }

    #[test]
    fn test_request_failure_keeps_message_verbatim() {
        let state = transition(
            &WorkflowState::InFlight,
            WorkflowEvent::RequestFailed("Server returned an error".to_string()),
        )
        .unwrap();
        assert_eq!(
            state,
            WorkflowState::Failure("Server returned an error".to_string())
        );
    }

    #[test]
    fn test_terminal_states_accept_resubmit() {
        let failed = WorkflowState::Failure("boom".to_string());
        assert_eq!(
            transition(&failed, WorkflowEvent::Submit).unwrap(),
            WorkflowState::Validating
        );
        let done = WorkflowState::Success(batch_outcome());
        assert_eq!(
            transition(&done, WorkflowEvent::Submit).unwrap(),
            WorkflowState::Validating
        );
    }

    #[test]
    fn test_submit_rejected_while_busy() {
        for busy in [WorkflowState::Validating, WorkflowState::InFlight] {
            assert!(busy.is_busy());
            let err = transition(&busy, WorkflowEvent::Submit).unwrap_err();
            assert!(matches!(err, ApplicationError::InvalidState(_)));
        }
    }

    #[test]
    fn test_undefined_transitions() {
        assert!(transition(&WorkflowState::Idle, WorkflowEvent::ValidationPassed).is_err());
        assert!(transition(
            &WorkflowState::Validating,
            WorkflowEvent::RequestSucceeded(batch_outcome())
        )
        .is_err());
        assert!(transition(
            &WorkflowState::Success(batch_outcome()),
            WorkflowEvent::RequestFailed("late".to_string())
        )
        .is_err());
    }
}
