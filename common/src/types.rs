//! 分類結果の型定義
//!
//! - Prediction: 分類器が返す (ラベル, 信頼度) の1件
//! - PredictionSet: 1画像分の上位N件（信頼度降順）
//! - PredictionRow: 表示用（ラベル + パーセント + バー幅）

use serde::{Deserialize, Serialize};

/// 表示する予測件数の既定値
pub const DEFAULT_TOP_K: usize = 5;

/// 分類器の予測1件
///
/// MobileNet の `{ className, probability }` 形式もそのまま読める。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(alias = "className")]
    pub label: String,
    #[serde(alias = "probability")]
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// 信頼度のパーセント値（0.0〜100.0）
    pub fn percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

/// 1画像分の予測セット（信頼度降順、最大 top_k 件）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSet {
    predictions: Vec<Prediction>,
}

impl PredictionSet {
    /// 分類器の出力から生成
    ///
    /// NaN等の非有限値は除外し、信頼度は 0.0〜1.0 に丸める。
    /// 降順に並べ替えたうえで top_k 件に切り詰める。
    pub fn from_ranked(predictions: Vec<Prediction>, top_k: usize) -> Self {
        let mut predictions: Vec<Prediction> = predictions
            .into_iter()
            .filter(|p| p.confidence.is_finite())
            .map(|mut p| {
                p.confidence = p.confidence.clamp(0.0, 1.0);
                p
            })
            .collect();

        // 安定ソートなので同率は分類器の順序を維持
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        predictions.truncate(top_k);

        Self { predictions }
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prediction> {
        self.predictions.iter()
    }

    /// 表示用の行に変換
    pub fn rows(&self) -> Vec<PredictionRow> {
        self.predictions.iter().map(PredictionRow::from).collect()
    }
}

impl<'a> IntoIterator for &'a PredictionSet {
    type Item = &'a Prediction;
    type IntoIter = std::slice::Iter<'a, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.iter()
    }
}

/// 予測リストの1行
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub label: String,
    /// "12.3%" 形式
    pub percent_text: String,
    /// バー幅（%）
    pub bar_width: f32,
}

impl PredictionRow {
    /// "label — 12.3%" 形式の見出し
    pub fn caption(&self) -> String {
        format!("{} — {}", self.label, self.percent_text)
    }

    /// style属性用
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.bar_width)
    }
}

impl From<&Prediction> for PredictionRow {
    fn from(prediction: &Prediction) -> Self {
        let percent = prediction.percent();
        Self {
            label: prediction.label.clone(),
            percent_text: format!("{:.1}%", percent),
            bar_width: percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mobilenet_format() {
        let json = r#"[{"className": "golf ball", "probability": 0.82}]"#;
        let preds: Vec<Prediction> = serde_json::from_str(json).unwrap();
        assert_eq!(preds[0].label, "golf ball");
        assert!((preds[0].confidence - 0.82).abs() < 1e-6);
    }

    #[test]
    fn test_from_ranked_sorts_and_truncates() {
        let preds = vec![
            Prediction::new("a", 0.1),
            Prediction::new("b", 0.5),
            Prediction::new("c", 0.05),
            Prediction::new("d", 0.2),
            Prediction::new("e", 0.03),
            Prediction::new("f", 0.09),
        ];
        let set = PredictionSet::from_ranked(preds, DEFAULT_TOP_K);

        let labels: Vec<&str> = set.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a", "f", "c"]);
    }

    #[test]
    fn test_from_ranked_clamps_and_drops_invalid() {
        let preds = vec![
            Prediction::new("nan", f32::NAN),
            Prediction::new("over", 1.7),
            Prediction::new("negative", -0.2),
        ];
        let set = PredictionSet::from_ranked(preds, DEFAULT_TOP_K);

        assert_eq!(set.len(), 2);
        assert_eq!(set.predictions()[0].confidence, 1.0);
        assert_eq!(set.predictions()[1].confidence, 0.0);
    }

    #[test]
    fn test_confidences_need_not_sum_to_one() {
        let set = PredictionSet::from_ranked(
            vec![Prediction::new("a", 0.3), Prediction::new("b", 0.2)],
            DEFAULT_TOP_K,
        );
        let total: f32 = set.iter().map(|p| p.confidence).sum();
        assert!(total < 1.0);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_row_formatting() {
        let row = PredictionRow::from(&Prediction::new("race car", 0.9));
        assert_eq!(row.percent_text, "90.0%");
        assert_eq!(row.caption(), "race car — 90.0%");
        assert!((row.bar_width - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_row_one_decimal() {
        let row = PredictionRow::from(&Prediction::new("pool", 0.12345));
        assert_eq!(row.percent_text, "12.3%");
    }
}
