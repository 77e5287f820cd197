//! サーバー状態バッジ（表示のみ）

use box_scanner_common::HealthMonitor;
use leptos::prelude::*;

#[component]
pub fn ServerStatusBadge(health: RwSignal<HealthMonitor>) -> impl IntoView {
    let state = move || health.with(|m| m.state());

    view! {
        <span class=move || format!("badge badge-{}", state().as_str())>
            {move || state().label()}
        </span>
    }
}
