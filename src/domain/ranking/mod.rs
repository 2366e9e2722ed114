//! Ranking Context - 排名结果上下文
//!
//! 职责:
//! - 服务端返回的分析结果实体（单份建议 / 批量排名）
//! - 派生展示状态（排名、技能预览、分数档位、展开行）

mod entities;
mod presenter;

pub use entities::{AnalysisResult, BatchResult, RankedCandidate};
pub use presenter::{
    format_score, job_description_preview, present, toggle_expand, RowView, ScoreBucket,
    JOB_DESCRIPTION_PREVIEW_CHARS, NO_ANALYSIS_TEXT, NOT_SPECIFIED_TEXT, SKILL_PREVIEW_LEN,
};
