//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - CI job summaries
//! - Pull request comments
//! - Registry package pages

use crate::models::ScoreReport;
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &ScoreReport) -> Result<String> {
    let mut md = String::new();

    let grade_emoji = match report.grade() {
        "A" => "🏆",
        "B" => "⭐",
        "C" => "⚠️",
        "D" => "❌",
        _ => "💀",
    };

    md.push_str(&format!(
        "# {grade_emoji} Quality Report: `{}`\n\n",
        report.package_name
    ));
    md.push_str(&format!(
        "**Overall: {}/100 (Grade {})** — generated {}\n\n",
        report.overall_score,
        report.grade(),
        report.timestamp.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("| Dimension | Score |\n|---|---|\n");
    md.push_str(&format!(
        "| Performance | {} |\n",
        score_cell(report.performance_score)
    ));
    md.push_str(&format!(
        "| Security | {} |\n",
        score_cell(report.security_score)
    ));
    md.push('\n');

    if !report.recommendations.is_empty() {
        md.push_str("## Recommendations\n\n");
        for recommendation in &report.recommendations {
            md.push_str(&format!("- {recommendation}\n"));
        }
        md.push('\n');
    }

    Ok(md)
}

fn score_cell(score: Option<u8>) -> String {
    match score {
        Some(score) => format!("{score}/100"),
        None => "no data".to_string(),
    }
}
