//! アプリ設定
//!
//! 既定値は組み込みプリセット。JSONで部分的に上書きできる。

use crate::error::{Error, Result};
use crate::matcher::{default_rules, KeywordRule, SportMatcher};
use crate::particle::ParticleConfig;
use crate::types::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};

/// 取得する予測件数の上限
pub const MAX_TOP_K: usize = 10;

/// 分類モデル（MobileNet）の読み込みオプション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub version: u8,
    pub alpha: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            version: 2,
            alpha: 1.0,
        }
    }
}

/// アプリ全体の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub top_k: usize,
    pub model: ModelConfig,
    pub particles: ParticleConfig,
    /// 優先順位順のキーワードルール
    pub rules: Vec<KeywordRule>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            model: ModelConfig::default(),
            particles: ParticleConfig::default(),
            rules: default_rules(),
        }
    }
}

impl AppConfig {
    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<()> {
        self.top_k = self.top_k.clamp(1, MAX_TOP_K);

        if self.rules.is_empty() {
            return Err(Error::Config("ルールが1件もありません".into()));
        }

        let particles = &self.particles;
        if !(particles.min_size > 0.0 && particles.max_size >= particles.min_size) {
            return Err(Error::Config(format!(
                "パーティクルサイズが不正です: {}〜{}",
                particles.min_size, particles.max_size
            )));
        }
        if !(particles.max_speed.is_finite() && particles.max_speed >= 0.0) {
            return Err(Error::Config("パーティクル速度が不正です".into()));
        }

        // キーワードの検証・正規化は matcher 側
        self.rules = SportMatcher::from_rules(std::mem::take(&mut self.rules))?
            .rules()
            .to_vec();
        Ok(())
    }

    /// ルール表を生成
    pub fn matcher(&self) -> Result<SportMatcher> {
        SportMatcher::from_rules(self.rules.clone())
    }
}
