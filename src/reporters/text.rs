//! Text (terminal) reporter with colors and formatting

use crate::models::ScoreReport;
use anyhow::Result;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: &str) -> &'static str {
    match grade {
        "A" => "\x1b[32m", // Green
        "B" => "\x1b[92m", // Light green
        "C" => "\x1b[33m", // Yellow
        "D" => "\x1b[91m", // Light red
        "F" => "\x1b[31m", // Red
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn format_score(score: Option<u8>) -> String {
    match score {
        Some(score) => format!("{score}/100"),
        None => "n/a".to_string(),
    }
}

/// Render a score report as formatted terminal output
pub fn render(report: &ScoreReport) -> Result<String> {
    let mut out = String::new();

    let grade = report.grade();
    let grade_c = grade_color(grade);
    out.push_str(&format!("\n{BOLD}Gemgauge Report: {}{RESET}\n", report.package_name));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Overall: {BOLD}{}/100{RESET}  Grade: {grade_c}{BOLD}{grade}{RESET}\n",
        report.overall_score
    ));
    out.push_str(&format!(
        "  Performance: {}  Security: {}\n",
        format_score(report.performance_score),
        format_score(report.security_score)
    ));
    out.push_str(&format!(
        "{DIM}Generated {}{RESET}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if !report.recommendations.is_empty() {
        out.push_str(&format!("\n{BOLD}RECOMMENDATIONS{RESET}\n"));
        for recommendation in &report.recommendations {
            out.push_str(&format!("  - {recommendation}\n"));
        }
    }

    Ok(out)
}
