//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Submission Context: 简历提交与校验
//! - Ranking Context: 分析结果与展示派生

pub mod ranking;
pub mod submission;
