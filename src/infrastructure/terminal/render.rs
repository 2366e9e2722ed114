//! 结果渲染

use std::fmt::Write;

use crate::application::workflow::CredentialState;
use crate::domain::ranking::{format_score, AnalysisResult, RowView, ScoreBucket};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// 渲染选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// 分数按档位着色
    pub color: bool,
}

fn ansi(bucket: ScoreBucket) -> &'static str {
    match bucket {
        ScoreBucket::High => "\x1b[32m",
        ScoreBucket::Medium => "\x1b[33m",
        ScoreBucket::Low => "\x1b[31m",
    }
}

fn skills_preview(row: &RowView) -> String {
    let mut preview = row.visible_skills.join(", ");
    if row.overflow_count > 0 {
        if !preview.is_empty() {
            preview.push(' ');
        }
        let _ = write!(preview, "+{} more", row.overflow_count);
    }
    preview
}

/// 批量排名表格，展开行在其下方显示详情
pub fn render_batch(
    rows: &[RowView],
    expanded: Option<usize>,
    job_description: &str,
    options: RenderOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis Results");
    let _ = writeln!(out, "Job Description: {}", job_description);
    let _ = writeln!(out);

    if rows.is_empty() {
        let _ = writeln!(out, "No candidates returned.");
        return out;
    }

    let name_width = rows
        .iter()
        .map(|row| row.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Applicant".len());

    let _ = writeln!(
        out,
        "{:>4}  {:<name_width$}  {:>5}  Key Skills",
        "Rank",
        "Applicant",
        "Score",
        name_width = name_width
    );

    for row in rows {
        let score = format!("{:>5}", format_score(row.score));
        let score = if options.color {
            format!("{}{}{}", ansi(row.score_bucket), score, RESET)
        } else {
            score
        };
        let marker = if expanded == Some(row.index) { "▾" } else { " " };
        let _ = writeln!(
            out,
            "{:>3}{}  {:<name_width$}  {}  {}",
            row.rank,
            marker,
            row.display_name,
            score,
            skills_preview(row),
            name_width = name_width
        );

        if expanded == Some(row.index) {
            let heading = |title: &str| {
                if options.color {
                    format!("{}{}{}", BOLD, title, RESET)
                } else {
                    title.to_string()
                }
            };
            let _ = writeln!(out);
            let _ = writeln!(out, "      {}", heading("Analysis Summary"));
            for line in row.analysis_text.lines() {
                let _ = writeln!(out, "      {}", line);
            }
            let _ = writeln!(out, "      {}", heading("All Skills"));
            let _ = writeln!(out, "      {}", row.all_skills.join(", "));
            let _ = writeln!(out);
        }
    }

    out
}

/// 单份简历结果：技能列表 + 原样输出的 Markdown 建议
pub fn render_single(result: &AnalysisResult) -> String {
    let mut out = String::new();
    if !result.skills.is_empty() {
        let _ = writeln!(out, "Detected Skills");
        let _ = writeln!(out, "  {}", result.skills.join(", "));
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "Suggestions");
    let _ = writeln!(out, "{}", result.suggestions);
    out
}

pub fn render_credential_status(state: &CredentialState) -> String {
    if state.is_set() {
        "API key is set".to_string()
    } else {
        "No API key set. Analysis will use the fallback method.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ranking::{present, BatchResult, RankedCandidate};

    fn rows() -> Vec<RowView> {
        present(&BatchResult {
            results: vec![
                RankedCandidate {
                    filename: "ada.pdf".to_string(),
                    name: Some("Ada".to_string()),
                    skills: ["Rust", "C", "Lisp", "Math"].iter().map(|s| s.to_string()).collect(),
                    score: 9.0,
                    analysis: Some("Strong fit".to_string()),
                },
                RankedCandidate {
                    filename: "bob.pdf".to_string(),
                    name: None,
                    skills: vec!["Excel".to_string()],
                    score: 4.5,
                    analysis: None,
                },
            ],
        })
    }

    #[test]
    fn test_render_batch_collapsed() {
        let out = render_batch(&rows(), None, "Rust developer", RenderOptions::default());
        assert!(out.contains("Job Description: Rust developer"));
        assert!(out.contains("Rust, C, Lisp +1 more"));
        assert!(out.contains("bob.pdf"));
        assert!(out.contains("4.5"));
        assert!(!out.contains("Analysis Summary"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_render_batch_expanded_row() {
        let out = render_batch(&rows(), Some(1), "Not specified", RenderOptions::default());
        assert!(out.contains("Analysis Summary"));
        assert!(out.contains("No analysis available"));
        assert!(!out.contains("Strong fit"));
    }

    #[test]
    fn test_render_batch_colors() {
        let out = render_batch(&rows(), None, "x", RenderOptions { color: true });
        assert!(out.contains("\x1b[32m"));
        assert!(out.contains("\x1b[31m"));
    }

    #[test]
    fn test_render_single() {
        let out = render_single(&AnalysisResult {
            skills: vec![],
            suggestions: "- Add metrics".to_string(),
        });
        assert!(!out.contains("Detected Skills"));
        assert!(out.contains("- Add metrics"));
    }

    #[test]
    fn test_render_credential_status() {
        let unset = CredentialState::default();
        assert!(render_credential_status(&unset).starts_with("No API key set"));
        let set = CredentialState::from_saved(Some("k".to_string()));
        assert_eq!(render_credential_status(&set), "API key is set");
    }
}
