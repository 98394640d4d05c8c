//! 予測リスト（ラベル + 信頼度バー）

use crate::app::AppContext;
use leptos::prelude::*;
use sport_lens_common::PredictionRow;

#[component]
pub fn PredictionList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let rows = ctx.rows;

    view! {
        <div id="predictions" class="predictions">
            {move || {
                rows.get()
                    .into_iter()
                    .map(|row| view! { <PredictionItem row=row /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn PredictionItem(row: PredictionRow) -> impl IntoView {
    let caption = row.caption();
    let bar_style = row.bar_style();

    view! {
        <div class="pred-item">
            {caption}
            <div class="progress">
                <div class="progress-bar" style=bar_style />
            </div>
        </div>
    }
}
