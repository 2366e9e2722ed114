//! Credential Sub-State
//!
//! 与请求生命周期正交，可在任何工作流状态下变化

/// 凭证表单状态
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialState {
    /// 已持久化的凭证
    saved: Option<String>,
    /// 输入框中的值，随请求一起发送
    draft: String,
    form_visible: bool,
    /// 最近一次凭证操作的错误，与分析错误分开展示
    error: Option<String>,
}

impl CredentialState {
    /// 启动时从存储初始化，saved 与 draft 相同
    pub fn from_saved(saved: Option<String>) -> Self {
        let saved = saved.filter(|value| !value.is_empty());
        Self {
            draft: saved.clone().unwrap_or_default(),
            saved,
            form_visible: false,
            error: None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.saved.is_some()
    }

    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 随分析请求发送的凭证，空输入不发送
    pub fn outgoing(&self) -> Option<String> {
        if self.draft.is_empty() {
            None
        } else {
            Some(self.draft.clone())
        }
    }

    pub(crate) fn toggle_form(&mut self) {
        self.form_visible = !self.form_visible;
    }

    pub(crate) fn set_draft(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// 保存成功：更新 saved 并收起表单
    pub(crate) fn mark_saved(&mut self, value: String) {
        self.draft = value.clone();
        self.saved = Some(value);
        self.form_visible = false;
        self.error = None;
    }

    /// 请求成功后保存用过的凭证，表单可见性不变
    pub(crate) fn mark_used(&mut self, value: String) {
        self.saved = Some(value);
        self.error = None;
    }

    pub(crate) fn mark_cleared(&mut self) {
        self.saved = None;
        self.draft.clear();
        self.error = None;
    }
}

impl std::fmt::Debug for CredentialState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialState")
            .field("saved", &self.saved.as_ref().map(|_| "<redacted>"))
            .field("draft_len", &self.draft.len())
            .field("form_visible", &self.form_visible)
            .field("error", &self.error)
            .finish()
    }
}
