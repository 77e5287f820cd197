//! 結果表示用の整形
//!
//! CLIのレポートとWebの結果表示で同じラベルを使う。

use crate::types::{AnalysisSummary, BoxCounts};

/// カウント欄の見出し
pub const CONFIRMED_TITLE: &str = "Confirmed Count";
pub const VISUAL_TITLE: &str = "Visual Count";
pub const SUMMARY_TITLE: &str = "Overall Summary";

/// 箱種別キーを表示ラベルに変換
///
/// # Examples
/// ```
/// use box_scanner_common::display::display_label;
///
/// assert_eq!(display_label("boxes_618"), "Boxes 618");
/// ```
pub fn display_label(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| if part == "boxes" { "Boxes" } else { part })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 1行分の表示データ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub label: String,
    pub count: u64,
}

/// `total` を除いたカウント行
pub fn count_rows(counts: &BoxCounts) -> Vec<CountRow> {
    counts
        .entries()
        .map(|(key, count)| CountRow {
            label: display_label(key),
            count,
        })
        .collect()
}

/// サマリーの固定4行
pub fn summary_rows(summary: &AnalysisSummary) -> Vec<CountRow> {
    [
        ("Total boxes detected", summary.total_boxes_detected),
        ("Total items processed", summary.total_processed),
        ("Total Boxes 618", summary.boxes_618_total),
        ("Total Boxes 623", summary.boxes_623_total),
    ]
    .into_iter()
    .map(|(label, count)| CountRow {
        label: label.to_string(),
        count,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::collections::BTreeMap;

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("boxes_623"), "Boxes 623");
        assert_eq!(display_label("pallet_large"), "pallet large");
        assert_eq!(display_label("boxes__700"), "Boxes 700");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn test_count_rows_skip_total_and_non_integers() {
        let counts = BoxCounts {
            total: 6,
            by_type: BTreeMap::from([
                ("boxes_623".to_string(), Value::from(4)),
                ("boxes_618".to_string(), Value::from(2)),
                ("confidence".to_string(), Value::from(0.93)),
            ]),
        };
        let rows = count_rows(&counts);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], CountRow { label: "Boxes 618".into(), count: 2 });
        assert_eq!(rows[1], CountRow { label: "Boxes 623".into(), count: 4 });
    }

    #[test]
    fn test_summary_rows_order() {
        let summary = AnalysisSummary {
            total_boxes_detected: 7,
            total_processed: 8,
            boxes_618_total: 2,
            boxes_623_total: 5,
            extra: BTreeMap::new(),
        };
        let rows = summary_rows(&summary);
        let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![7, 8, 2, 5]);
        assert_eq!(rows[0].label, "Total boxes detected");
    }
}
