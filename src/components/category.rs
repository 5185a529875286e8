// src/components/category.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// カードやスロットのカテゴリタグだよ！🐸🦋
///
/// `"frog"` とか `"butterfly"` みたいな文字列そのまま。
/// どのタグをワイルドカード（なんでも受け入れる）として扱うかは `GameConfig` で決める。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
