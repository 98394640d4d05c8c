//! ステータス・判定結果表示

use crate::app::AppContext;
use leptos::prelude::*;

#[component]
pub fn StatusBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let status = ctx.status;
    let result = ctx.result;

    view! {
        <div class="status-bar">
            <p
                id="loading"
                class=move || format!("status status-{}", status.get().as_str())
            >
                {move || status.get().message()}
            </p>
            <h2 id="resultLabel" class="result-label">
                {move || result.get().unwrap_or_default()}
            </h2>
        </div>
    }
}
