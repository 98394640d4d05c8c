//! 分類パイプライン（CLI/WASM非依存）
//!
//! 分類器呼び出し → 予測セット → カテゴリ判定 → 表示状態 の流れをまとめる。
//! 分類器そのものは外部（ブラウザではMobileNet）で、ここでは trait 越しに呼ぶ。

use crate::category::Category;
use crate::error::{Error, Result};
use crate::matcher::SportMatcher;
use crate::types::{PredictionRow, PredictionSet, Prediction};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 外部の画像分類器
///
/// 実装は非同期で、ブラウザのイベントループ上で動く前提（Send不要）。
#[allow(async_fn_in_trait)]
pub trait Classifier {
    type Image: ?Sized;

    /// 上位 top_k 件の予測を返す
    async fn classify(&self, image: &Self::Image, top_k: usize) -> Result<Vec<Prediction>>;
}

/// 1回の分類結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationOutcome {
    pub predictions: PredictionSet,
    pub category: Option<Category>,
}

impl ClassificationOutcome {
    pub fn new(predictions: PredictionSet, matcher: &SportMatcher) -> Self {
        let category = decide_category(matcher, &predictions);
        Self {
            predictions,
            category,
        }
    }

    pub fn rows(&self) -> Vec<PredictionRow> {
        self.predictions.rows()
    }

    /// 結果ラベルの文言
    pub fn result_text(&self) -> String {
        result_text(self.category)
    }
}

/// 順位順にラベルを照合し、最初にカテゴリが付いたものを採用
///
/// 最上位の予測とは限らない（最上位が未知ラベルなら2位以下を見る）。
pub fn decide_category(matcher: &SportMatcher, predictions: &PredictionSet) -> Option<Category> {
    predictions
        .iter()
        .find_map(|p| matcher.match_category(&p.label))
}

/// 結果ラベルの文言
pub fn result_text(category: Option<Category>) -> String {
    match category {
        Some(category) => format!("🏆 スポーツ: {}", category.display_name()),
        None => "❔ スポーツの種類を特定できませんでした".to_string(),
    }
}

/// 分類器の読み込み状態
#[derive(Debug, Clone)]
pub enum ModelSlot<C> {
    Loading,
    Ready(C),
    /// 読み込み失敗（理由）。待っても回復しない
    Failed(String),
}

impl<C> ModelSlot<C> {
    /// 使用可能な分類器を取得
    ///
    /// 読み込み中なら `Error::ModelNotReady`、失敗済みなら `Error::ModelLoad`。
    pub fn get(&self) -> Result<&C> {
        match self {
            ModelSlot::Loading => Err(Error::ModelNotReady),
            ModelSlot::Ready(classifier) => Ok(classifier),
            ModelSlot::Failed(reason) => Err(Error::ModelLoad(reason.clone())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelSlot::Ready(_))
    }
}

/// 分類を実行してカテゴリ判定まで行う
pub async fn run_classification<C: Classifier>(
    model: &ModelSlot<C>,
    image: &C::Image,
    matcher: &SportMatcher,
    top_k: usize,
) -> Result<ClassificationOutcome> {
    let classifier = model.get()?;
    let raw = classifier.classify(image, top_k).await?;
    let predictions = PredictionSet::from_ranked(raw, top_k);
    Ok(ClassificationOutcome::new(predictions, matcher))
}

/// ステータス表示
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    LoadingModel,
    Ready,
    ModelLoadFailed,
    ModelNotReady,
    Analyzing,
    Done,
    Failed(String),
}

impl Status {
    pub fn message(&self) -> String {
        match self {
            Status::LoadingModel => "🚀 モデルを読み込み中...".to_string(),
            Status::Ready => "✅ 準備完了！".to_string(),
            Status::ModelLoadFailed => "❌ モデルの読み込みに失敗しました".to_string(),
            Status::ModelNotReady => "⏳ モデルの読み込みが完了していません".to_string(),
            Status::Analyzing => "🔍 解析中...".to_string(),
            Status::Done => "✅ 解析完了！".to_string(),
            Status::Failed(reason) => format!("❌ エラーが発生しました: {}", reason),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::LoadingModel => "loading",
            Status::Ready => "ready",
            Status::ModelLoadFailed => "error",
            Status::ModelNotReady => "pending",
            Status::Analyzing => "analyzing",
            Status::Done => "done",
            Status::Failed(_) => "error",
        }
    }

    /// 分類失敗をステータスに変換
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::ModelNotReady => Status::ModelNotReady,
            Error::ModelLoad(_) => Status::ModelLoadFailed,
            other => Status::Failed(other.to_string()),
        }
    }
}

/// リクエスト世代
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// 分類リクエストの世代カウンタ
///
/// 新しい画像（またはクリア）のたびに世代を進め、
/// 完了時点で最新世代でない結果は描画しない。
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい世代を開始
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// 進行中のリクエストを全て無効化（ビューのクリア時）
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// 完了した結果を受け取る（最新世代でなければ捨てて None）
    pub fn accept<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        self.is_current(ticket).then_some(result)
    }
}
