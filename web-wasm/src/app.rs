//! メインアプリケーションコンポーネント

use crate::classifier::{load_image_element, MobileNet};
use crate::components::{
    header::Header,
    particle_canvas::ParticleCanvas,
    prediction_list::PredictionList,
    status_bar::StatusBar,
    upload_area::UploadArea,
};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sport_lens_common::{
    run_classification, AppConfig, ClassificationOutcome, Error, ImageSource, ModelSlot,
    PredictionRow, RequestTracker, Result, SportMatcher, Status,
};
use std::sync::Arc;

const APP_CONFIG_JSON: &str = include_str!("../config/app.json");

/// アプリケーションの状態
///
/// 分類器ハンドルと表示先をまとめて context で配る。
/// ステータス・結果表示の書き込みはここのメソッドだけが行う。
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub matcher: Arc<SportMatcher>,
    pub status: RwSignal<Status>,
    pub preview: RwSignal<Option<String>>,
    pub rows: RwSignal<Vec<PredictionRow>>,
    pub result: RwSignal<Option<String>>,
    model: StoredValue<ModelSlot<MobileNet>, LocalStorage>,
    tracker: RequestTracker,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let matcher = config.matcher().unwrap_or_else(|e| {
            console::error!(format!("ルール設定が不正です: {}", e));
            SportMatcher::default()
        });

        Self {
            config: Arc::new(config),
            matcher: Arc::new(matcher),
            status: RwSignal::new(Status::LoadingModel),
            preview: RwSignal::new(None),
            rows: RwSignal::new(Vec::new()),
            result: RwSignal::new(None),
            model: StoredValue::new_local(ModelSlot::Loading),
            tracker: RequestTracker::new(),
        }
    }

    /// モデル読み込み（起動時に1回）
    pub async fn load_model(&self) {
        self.status.set(Status::LoadingModel);
        match MobileNet::load(&self.config.model).await {
            Ok(model) => {
                self.model.set_value(ModelSlot::Ready(model));
                self.status.set(Status::Ready);
                console::log!("model loaded");
            }
            Err(e) => {
                console::error!(e.to_string());
                self.model.set_value(ModelSlot::Failed(e.to_string()));
                self.status.set(Status::ModelLoadFailed);
            }
        }
    }

    /// 新しい画像を表示して分類を開始
    ///
    /// 以前の分類が未完了でも待たない。完了時に最新世代でなければ捨てる。
    pub fn submit_image(&self, source: ImageSource) {
        let ticket = self.tracker.begin();
        console::log!(format!("classify: {} ({})", source.file_name, source.mime_type()));
        self.preview.set(Some(source.data_url.clone()));
        self.rows.set(Vec::new());
        self.result.set(None);
        self.status.set(Status::Analyzing);

        let ctx = self.clone();
        spawn_local(async move {
            let outcome = ctx.classify(&source).await;

            let Some(outcome) = ctx.tracker.accept(ticket, outcome) else {
                console::log!(format!(
                    "stale result dropped: {} ({})",
                    source.file_name,
                    source.mime_type()
                ));
                return;
            };

            match outcome {
                Ok(outcome) => ctx.show_outcome(outcome),
                Err(e) => ctx.report_error(&e),
            }
        });
    }

    async fn classify(&self, source: &ImageSource) -> Result<ClassificationOutcome> {
        let model = self.model.get_value();
        // デコード前にモデル状態を確認
        model.get()?;

        let image = load_image_element(&source.data_url).await?;
        run_classification(&model, &image, &self.matcher, self.config.top_k).await
    }

    fn show_outcome(&self, outcome: ClassificationOutcome) {
        self.rows.set(outcome.rows());
        self.result.set(Some(outcome.result_text()));
        self.status.set(Status::Done);
    }

    /// 失敗をログに出してステータスに表示（再試行はしない）
    pub fn report_error(&self, error: &Error) {
        console::error!(error.to_string());
        self.status.set(Status::from_error(error));
    }

    /// 表示をクリアし、進行中の分類結果も無効にする
    pub fn clear(&self) {
        self.tracker.invalidate();
        self.preview.set(None);
        self.rows.set(Vec::new());
        self.result.set(None);
        if self.model.with_value(|m| m.is_ready()) {
            self.status.set(Status::Ready);
        }
    }
}

/// 組み込み設定を読み込み（不正なら既定値）
pub fn load_config() -> AppConfig {
    AppConfig::from_json(APP_CONFIG_JSON).unwrap_or_else(|e| {
        console::error!(format!("設定の読み込みに失敗しました: {}", e));
        AppConfig::default()
    })
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(load_config());
    provide_context(ctx.clone());

    {
        let ctx = ctx.clone();
        spawn_local(async move {
            ctx.load_model().await;
        });
    }

    let particles = ctx.config.particles.clone();

    view! {
        <ParticleCanvas config=particles />
        <div class="container">
            <Header />
            <StatusBar />
            <UploadArea />
            <PredictionList />
        </div>
    }
}
