//! スポーツカテゴリ定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// 判定可能なスポーツカテゴリ（固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Golf,
    Basketball,
    F1,
    Swimming,
    Volleyball,
    Tennis,
}

impl Category {
    /// 識別子（設定ファイル・表示用キー）
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Golf => "golf",
            Category::Basketball => "basketball",
            Category::F1 => "f1",
            Category::Swimming => "swimming",
            Category::Volleyball => "volleyball",
            Category::Tennis => "tennis",
        }
    }

    /// 結果ラベル用の表示名（大文字）
    pub fn display_name(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
