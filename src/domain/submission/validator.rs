//! Submission Validator - 发送前校验
//!
//! 纯同步校验，必须在任何网络请求之前完成

use super::{ResumeFile, Submission, ValidationError};

/// 服务端接受的简历格式
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// 提交校验器
#[derive(Debug, Clone)]
pub struct SubmissionValidator {
    allowed_extensions: Vec<String>,
}

impl Default for SubmissionValidator {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS.iter().map(|ext| ext.to_string()))
    }
}

impl SubmissionValidator {
    /// 空列表表示不限制文件类型
    pub fn new<I, S>(allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.into().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// 批量模式：至少一个文件，职位描述去空白后非空
    pub fn validate_batch(
        &self,
        files: &[ResumeFile],
        job_description: &str,
    ) -> Result<(), ValidationError> {
        if files.is_empty() {
            return Err(ValidationError::NoFilesSelected);
        }
        if job_description.trim().is_empty() {
            return Err(ValidationError::MissingJobDescription);
        }
        files.iter().try_for_each(|file| self.check_file_type(file))
    }

    /// 单份模式：必须有文件，职位描述可选且不校验
    pub fn validate_single(&self, file: Option<&ResumeFile>) -> Result<(), ValidationError> {
        let file = file.ok_or(ValidationError::NoFileSelected)?;
        self.check_file_type(file)
    }

    pub fn validate(&self, submission: &Submission) -> Result<(), ValidationError> {
        match submission {
            Submission::Single { file, .. } => self.validate_single(file.as_ref()),
            Submission::Batch {
                files,
                job_description,
            } => self.validate_batch(files, job_description),
        }
    }

    fn check_file_type(&self, file: &ResumeFile) -> Result<(), ValidationError> {
        if self.allowed_extensions.is_empty() {
            return Ok(());
        }
        match file.extension() {
            Some(ext) if self.allowed_extensions.contains(&ext) => Ok(()),
            _ => Err(ValidationError::UnsupportedFileType(
                file.filename().to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(name: &str) -> ResumeFile {
        ResumeFile::new(name, b"resume".to_vec())
    }

    #[test]
    fn test_batch_without_files_fails_first() {
        let validator = SubmissionValidator::default();
        assert_eq!(
            validator.validate_batch(&[], "Senior Rust engineer"),
            Err(ValidationError::NoFilesSelected)
        );
        // 两个条件都不满足时先报告文件缺失
        assert_eq!(
            validator.validate_batch(&[], "   "),
            Err(ValidationError::NoFilesSelected)
        );
    }

    #[test]
    fn test_batch_blank_job_description() {
        let validator = SubmissionValidator::default();
        let files = vec![resume("a.pdf"), resume("b.docx")];
        for blank in ["", " ", "\n\t  "] {
            assert_eq!(
                validator.validate_batch(&files, blank),
                Err(ValidationError::MissingJobDescription)
            );
        }
    }

    #[test]
    fn test_batch_ok() {
        let validator = SubmissionValidator::default();
        let files = vec![resume("a.pdf"), resume("b.DOCX"), resume("c.txt")];
        assert!(validator.validate_batch(&files, "Backend developer").is_ok());
    }

    #[test]
    fn test_single_requires_file_only() {
        let validator = SubmissionValidator::default();
        assert_eq!(
            validator.validate_single(None),
            Err(ValidationError::NoFileSelected)
        );
        let submission = Submission::single(resume("cv.pdf"), None);
        assert!(validator.validate(&submission).is_ok());
    }

    #[test]
    fn test_unsupported_file_type() {
        let validator = SubmissionValidator::default();
        let files = vec![resume("a.pdf"), resume("photo.png")];
        assert_eq!(
            validator.validate_batch(&files, "Designer"),
            Err(ValidationError::UnsupportedFileType("photo.png".to_string()))
        );
        assert_eq!(
            validator.validate_single(Some(&resume("noext"))),
            Err(ValidationError::UnsupportedFileType("noext".to_string()))
        );
    }

    #[test]
    fn test_empty_allow_list_accepts_anything() {
        let validator = SubmissionValidator::new(Vec::<String>::new());
        assert!(validator.validate_single(Some(&resume("photo.png"))).is_ok());
    }

    #[test]
    fn test_allow_list_normalized() {
        let validator = SubmissionValidator::new([".PDF"]);
        assert!(validator.validate_single(Some(&resume("cv.pdf"))).is_ok());
        assert!(validator.validate_single(Some(&resume("cv.txt"))).is_err());
    }
}
