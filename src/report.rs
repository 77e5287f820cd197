//! 解析結果の表示と保存

use box_scanner_common::display::{
    count_rows, summary_rows, CountRow, CONFIRMED_TITLE, SUMMARY_TITLE, VISUAL_TITLE,
};
use box_scanner_common::{AnalysisData, BoxCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// 保存用レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub file_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub data: AnalysisData,
}

impl AnalysisReport {
    pub fn new(file_name: impl Into<String>, data: AnalysisData) -> Self {
        Self {
            file_name: file_name.into(),
            analyzed_at: Utc::now(),
            data,
        }
    }
}

fn push_rows(out: &mut Vec<String>, rows: &[CountRow], indent: &str) {
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in rows {
        out.push(format!("{indent}{:<width$}  {:>5}", row.label, row.count));
    }
}

fn push_counts(out: &mut Vec<String>, title: &str, counts: &BoxCounts) {
    out.push(format!("{} (total: {})", title, counts.total));
    push_rows(out, &count_rows(counts), "  ");
}

/// ターミナル表示用の行
pub fn render_lines(data: &AnalysisData) -> Vec<String> {
    let mut out = vec!["Analysis Results".to_string(), String::new()];

    push_counts(&mut out, CONFIRMED_TITLE, &data.confirmed_count);
    out.push(String::new());
    push_counts(&mut out, VISUAL_TITLE, &data.visual_count);
    out.push(String::new());

    out.push(SUMMARY_TITLE.to_string());
    push_rows(&mut out, &summary_rows(&data.summary), "  ");

    out
}

pub fn render(data: &AnalysisData) -> String {
    render_lines(data).join("\n")
}

pub fn save_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
