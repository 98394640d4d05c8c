//! Sport Lens Common Library
//!
//! 画像分類結果からスポーツカテゴリを判定するロジックと、
//! 背景パーティクルのシミュレーション。WASM/ネイティブ共通。

pub mod category;
pub mod config;
pub mod error;
pub mod image_source;
pub mod matcher;
pub mod particle;
pub mod pipeline;
pub mod types;

pub use category::Category;
pub use config::{AppConfig, ModelConfig};
pub use error::{Error, Result};
pub use image_source::{ImageKind, ImageSource};
pub use matcher::{default_rules, KeywordRule, SportMatcher};
pub use particle::{Particle, ParticleConfig, ParticleField};
pub use pipeline::{
    decide_category, result_text, run_classification, ClassificationOutcome, Classifier,
    ModelSlot, RequestTicket, RequestTracker, Status,
};
pub use types::{Prediction, PredictionRow, PredictionSet, DEFAULT_TOP_K};
