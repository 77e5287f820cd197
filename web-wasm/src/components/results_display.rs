//! 解析結果の表示

use box_scanner_common::display::{
    count_rows, summary_rows, CONFIRMED_TITLE, SUMMARY_TITLE, VISUAL_TITLE,
};
use box_scanner_common::{AnalysisData, BoxCounts};
use leptos::prelude::*;

#[component]
fn CountSection(title: &'static str, counts: BoxCounts) -> impl IntoView {
    let total = counts.total;
    let rows = count_rows(&counts);

    view! {
        <div class="count-section">
            <div class="count-header">
                <h4>{title}</h4>
                <span class="badge badge-total">{total}</span>
            </div>
            <ul class="count-list">
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <li>
                            <span>{row.label}</span>
                            <span class="count">{row.count}</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
pub fn ResultsDisplay(results: AnalysisData) -> impl IntoView {
    let summary = summary_rows(&results.summary);

    view! {
        <div class="results">
            <h3>"📦 Analysis Results"</h3>

            <div class="results-grid">
                <CountSection title=CONFIRMED_TITLE counts=results.confirmed_count />
                <CountSection title=VISUAL_TITLE counts=results.visual_count />
            </div>

            <div class="summary">
                <h4>{SUMMARY_TITLE}</h4>
                {summary
                    .into_iter()
                    .map(|row| view! {
                        <div class="summary-row">
                            <span>{row.label}</span>
                            <span class="count">{row.count}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
