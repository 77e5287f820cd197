//! ヘッダーコンポーネント

use box_scanner_common::HealthMonitor;
use leptos::prelude::*;

use super::server_status_badge::ServerStatusBadge;
use crate::theme::Theme;

#[component]
pub fn Header(theme: RwSignal<Theme>, health: RwSignal<HealthMonitor>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"📦 Box Scanner"</h1>
            <ServerStatusBadge health=health />
            <button
                class="btn btn-icon"
                on:click=move |_| theme.update(|t| *t = t.toggled())
            >
                {move || theme.get().toggle_icon()}
            </button>
        </header>
    }
}
