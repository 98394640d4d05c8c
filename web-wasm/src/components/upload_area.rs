//! アップロードエリアコンポーネント
//!
//! ファイル選択とドラッグ&ドロップのどちらも、
//! Data URL読み込み → 画像判定 → AppContext::submit_image に合流する。

use crate::app::AppContext;
use gloo::file::callbacks::{read_as_data_url, FileReader};
use leptos::html;
use leptos::prelude::*;
use sport_lens_common::ImageSource;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    // 読み込み中のリーダー（新しいファイルで置き換えると前の読み込みは中断）
    let pending_read = StoredValue::new_local(None::<FileReader>);

    let handle_file = {
        let ctx = ctx.clone();
        move |file: File| {
            let reader = read_file(file, ctx.clone());
            pending_read.set_value(Some(reader));
        }
    };

    let open_file_dialog = move || {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = {
        let handle_file = handle_file.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                handle_file(file);
            }
            // 同じファイルを再選択しても change が発火するように
            input.set_value("");
        }
    };

    let on_drop = {
        let handle_file = handle_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                handle_file(file);
            }
        }
    };

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
    };

    let preview = ctx.preview;
    let on_clear = {
        let ctx = ctx.clone();
        move |_| ctx.clear()
    };

    view! {
        <div class="upload-panel">
            <input
                type="file"
                id="fileInput"
                accept="image/*"
                style="display: none"
                node_ref=input_ref
                on:change=on_change
            />

            <div
                id="dropzone"
                class=move || {
                    if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                }
                on:dragenter=on_dragenter
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
                on:click=move |_| open_file_dialog()
            >
                <Show
                    when=move || preview.get().is_some()
                    fallback=|| view! {
                        <div id="placeholder" class="placeholder">
                            <div class="upload-icon">"🏅"</div>
                            <p>"画像をドラッグ&ドロップ または クリックして選択"</p>
                            <p class="text-muted">"対応形式: JPEG, PNG, GIF, WebP, BMP, SVG"</p>
                        </div>
                    }
                >
                    <img
                        id="preview"
                        class="preview"
                        alt="preview"
                        src=move || preview.get().unwrap_or_default()
                    />
                </Show>
            </div>

            <div class="upload-actions">
                <button id="uploadBtn" class="btn btn-primary" on:click=move |_| open_file_dialog()>
                    "📂 画像を選択"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || preview.get().is_none()
                    on:click=on_clear
                >
                    "クリア"
                </button>
            </div>
        </div>
    }
}

/// ファイルを Data URL として読み込み、画像判定のうえ分類に回す
///
/// 読み込み失敗もステータスに表示する。
fn read_file(file: File, ctx: AppContext) -> FileReader {
    let file = gloo::file::File::from(file);
    let file_name = file.name();

    read_as_data_url(&file, move |read| {
        let read = read.map_err(|e| e.to_string());
        match ImageSource::from_file_read(&file_name, read) {
            Ok(source) => ctx.submit_image(source),
            Err(e) => ctx.report_error(&e),
        }
    })
}
