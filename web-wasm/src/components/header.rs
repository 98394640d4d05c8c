//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Sport Lens - 写真からスポーツ判定"</h1>
        </header>
    }
}
