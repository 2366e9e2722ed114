//! Submission Context - Value Objects

use std::path::Path;

/// 简历文件（文件名 + 原始字节）
///
/// 文本抽取在服务端完成，客户端只负责原样上传
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    filename: String,
    bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// 从路径读取文件，文件名取路径最后一段
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(filename, bytes))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// 小写扩展名，无扩展名时返回 None
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

/// 分析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// 单份简历，返回技能和修改建议
    Single,
    /// 多份简历对同一职位描述排名
    Batch,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Single => "single",
            AnalysisMode::Batch => "batch",
        }
    }
}

/// 一次提交
///
/// 凭证不属于提交本身，由控制器在发送时附加
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Single {
        file: Option<ResumeFile>,
        job_description: Option<String>,
    },
    Batch {
        files: Vec<ResumeFile>,
        job_description: String,
    },
}

impl Submission {
    pub fn single(file: ResumeFile, job_description: Option<String>) -> Self {
        Self::Single {
            file: Some(file),
            job_description,
        }
    }

    pub fn batch(files: Vec<ResumeFile>, job_description: impl Into<String>) -> Self {
        Self::Batch {
            files,
            job_description: job_description.into(),
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        match self {
            Submission::Single { .. } => AnalysisMode::Single,
            Submission::Batch { .. } => AnalysisMode::Batch,
        }
    }

    pub fn file_count(&self) -> usize {
        match self {
            Submission::Single { file, .. } => usize::from(file.is_some()),
            Submission::Batch { files, .. } => files.len(),
        }
    }

    pub fn job_description(&self) -> Option<&str> {
        match self {
            Submission::Single {
                job_description, ..
            } => job_description.as_deref(),
            Submission::Batch {
                job_description, ..
            } => Some(job_description.as_str()),
        }
    }
}
