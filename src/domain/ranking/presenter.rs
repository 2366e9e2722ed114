//! Ranking Presenter - 派生展示状态
//!
//! 所有函数都是纯函数，不修改底层结果

use super::BatchResult;

/// 表格中预览的技能数
pub const SKILL_PREVIEW_LEN: usize = 3;

/// 职位描述预览的最大字符数
pub const JOB_DESCRIPTION_PREVIEW_CHARS: usize = 150;

pub const NO_ANALYSIS_TEXT: &str = "No analysis available";

pub const NOT_SPECIFIED_TEXT: &str = "Not specified";

/// 分数档位，仅用于展示强调
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBucket {
    High,
    Medium,
    Low,
}

impl ScoreBucket {
    /// 边界值归入较低档位（严格大于）
    pub fn from_score(score: f64) -> Self {
        if score > 7.0 {
            ScoreBucket::High
        } else if score > 5.0 {
            ScoreBucket::Medium
        } else {
            ScoreBucket::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBucket::High => "high",
            ScoreBucket::Medium => "medium",
            ScoreBucket::Low => "low",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreBucket::High => "green",
            ScoreBucket::Medium => "orange",
            ScoreBucket::Low => "crimson",
        }
    }
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// 在结果序列中的位置（0 起）
    pub index: usize,
    /// index + 1，不单独存储
    pub rank: usize,
    pub display_name: String,
    pub visible_skills: Vec<String>,
    pub overflow_count: usize,
    pub all_skills: Vec<String>,
    pub score: f64,
    pub score_bucket: ScoreBucket,
    pub analysis_text: String,
}

/// 按服务端顺序生成行视图，从不重排
pub fn present(batch: &BatchResult) -> Vec<RowView> {
    batch
        .results
        .iter()
        .enumerate()
        .map(|(index, candidate)| RowView {
            index,
            rank: index + 1,
            display_name: candidate.display_name().to_string(),
            visible_skills: candidate
                .skills
                .iter()
                .take(SKILL_PREVIEW_LEN)
                .cloned()
                .collect(),
            overflow_count: candidate.skills.len().saturating_sub(SKILL_PREVIEW_LEN),
            all_skills: candidate.skills.clone(),
            score: candidate.score,
            score_bucket: ScoreBucket::from_score(candidate.score),
            analysis_text: candidate
                .analysis
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(NO_ANALYSIS_TEXT)
                .to_string(),
        })
        .collect()
}

/// 点击已展开的行则收起，否则展开被点击的行
pub fn toggle_expand(current: Option<usize>, clicked: usize) -> Option<usize> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// 职位描述预览：超过 150 字符截断并追加省略号，缺失时显示占位文本
pub fn job_description_preview(job_description: Option<&str>) -> String {
    match job_description {
        None | Some("") => NOT_SPECIFIED_TEXT.to_string(),
        Some(text) if text.chars().count() > JOB_DESCRIPTION_PREVIEW_CHARS => {
            let head: String = text.chars().take(JOB_DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{}...", head)
        }
        Some(text) => text.to_string(),
    }
}

/// 整数分数不显示小数部分
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        "0".to_string()
    } else if score.is_finite() && score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        score.to_string()
    }
}
