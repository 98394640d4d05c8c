//! カテゴリ判定モジュール
//!
//! 分類ラベル（自由テキスト）をキーワードの部分一致でスポーツカテゴリに変換する。
//! ルールは優先順位順に並べたただのデータで、先に一致したルールが勝つ。

use crate::category::Category;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// キーワードルール: カテゴリと、それを示す小文字キーワード列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// ラベル（小文字化済み）にいずれかのキーワードが含まれるか
    fn matches(&self, lower_label: &str) -> bool {
        self.keywords.iter().any(|k| lower_label.contains(k.as_str()))
    }
}

/// 組み込みプリセット（優先順位順）
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(Category::Golf, &["golf", "golf ball", "golf club"]),
        KeywordRule::new(Category::Basketball, &["basketball", "basketball player"]),
        KeywordRule::new(
            Category::F1,
            &["race car", "racing car", "formula", "f1", "sports car"],
        ),
        KeywordRule::new(Category::Swimming, &["swimming", "swimmer", "pool"]),
        KeywordRule::new(Category::Volleyball, &["volleyball", "volleyball player"]),
        KeywordRule::new(Category::Tennis, &["tennis", "tennis ball", "racquet", "racket"]),
    ]
}

/// 優先順位付きルール表
#[derive(Debug, Clone, PartialEq)]
pub struct SportMatcher {
    rules: Vec<KeywordRule>,
}

impl Default for SportMatcher {
    fn default() -> Self {
        Self { rules: default_rules() }
    }
}

impl SportMatcher {
    /// ルール列から生成
    ///
    /// キーワードは trim + 小文字化して保持する。
    /// 空キーワードは全ラベルに一致してしまうためエラー。
    pub fn from_rules(rules: Vec<KeywordRule>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(rules.len());

        for rule in rules {
            if rule.keywords.is_empty() {
                return Err(Error::Config(format!(
                    "カテゴリ {} にキーワードがありません",
                    rule.category
                )));
            }

            let mut keywords = Vec::with_capacity(rule.keywords.len());
            for keyword in &rule.keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(Error::Config(format!(
                        "カテゴリ {} に空のキーワードがあります",
                        rule.category
                    )));
                }
                keywords.push(keyword);
            }

            normalized.push(KeywordRule {
                category: rule.category,
                keywords,
            });
        }

        Ok(Self { rules: normalized })
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// ラベルをカテゴリに変換（大文字小文字無視、一致なしはNone）
    pub fn match_category(&self, label: &str) -> Option<Category> {
        let lower = label.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.category)
    }
}
