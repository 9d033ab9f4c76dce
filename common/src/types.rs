//! 型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - CatalogRecord: 製品カタログの1行（読み込み後は不変）
//! - CategoryTag / Rating: エントリ分類と評価の閉じた列挙
//! - Entry / EntryDraft: ユーザーが記録した製品エントリ
//! - Suggestion: カタログ候補を選択したときの自動入力値

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// カタログの1製品
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogRecord {
    pub brand: String,
    pub name: String,
    /// 自由記述の種類（例: "gel cleanser"）
    #[serde(rename = "type")]
    pub product_type: String,
    pub country: String,
    pub ingredients: String,
    pub after_use: String,
}

impl CatalogRecord {
    /// ブランドと製品名だけを持つレコードを作る
    pub fn new(brand: impl Into<String>, name: impl Into<String>, product_type: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            name: name.into(),
            product_type: product_type.into(),
            ..Default::default()
        }
    }

    /// 検索対象として保持できるか（brand・nameが空でない）
    pub fn is_searchable(&self) -> bool {
        !self.brand.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// エントリのカテゴリ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    Cleanser,
    #[default]
    Moisturizer,
    Serum,
    Sunscreen,
    Treatment,
    Other,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 6] = [
        CategoryTag::Cleanser,
        CategoryTag::Moisturizer,
        CategoryTag::Serum,
        CategoryTag::Sunscreen,
        CategoryTag::Treatment,
        CategoryTag::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::Cleanser => "cleanser",
            CategoryTag::Moisturizer => "moisturizer",
            CategoryTag::Serum => "serum",
            CategoryTag::Sunscreen => "sunscreen",
            CategoryTag::Treatment => "treatment",
            CategoryTag::Other => "other",
        }
    }

    /// 表示用ラベル（先頭大文字）
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTag::Cleanser => "Cleanser",
            CategoryTag::Moisturizer => "Moisturizer",
            CategoryTag::Serum => "Serum",
            CategoryTag::Sunscreen => "Sunscreen",
            CategoryTag::Treatment => "Treatment",
            CategoryTag::Other => "Other",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        CategoryTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == lower)
            .ok_or_else(|| Error::Parse(format!("unknown category: {}", s)))
    }
}

/// 使用感の評価
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    LovedIt,
    LikedIt,
    #[default]
    Neutral,
    DislikedIt,
    BrokeMeOut,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::LovedIt,
        Rating::LikedIt,
        Rating::Neutral,
        Rating::DislikedIt,
        Rating::BrokeMeOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::LovedIt => "loved_it",
            Rating::LikedIt => "liked_it",
            Rating::Neutral => "neutral",
            Rating::DislikedIt => "disliked_it",
            Rating::BrokeMeOut => "broke_me_out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::LovedIt => "Loved It",
            Rating::LikedIt => "Liked It",
            Rating::Neutral => "Neutral",
            Rating::DislikedIt => "Disliked It",
            Rating::BrokeMeOut => "Broke Me Out",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = Error;

    /// "loved_it" / "loved-it" / "Loved It" のいずれも受け付ける
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Rating::ALL
            .into_iter()
            .find(|rating| rating.as_str() == key)
            .ok_or_else(|| Error::Parse(format!("unknown rating: {}", s)))
    }
}

/// 記録済みの製品エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub category: CategoryTag,
    pub rating: Rating,
    #[serde(default)]
    pub notes: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// 入力フォームの下書き
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub product_name: String,
    pub brand: String,
    pub category: CategoryTag,
    pub rating: Rating,
    pub notes: String,
}

impl EntryDraft {
    /// 下書きを検証してエントリを確定する
    ///
    /// 製品名は必須。ブランドとメモは空ならNoneになる。
    pub fn into_entry(self, id: String, owner_id: &str, created_at: DateTime<Utc>) -> Result<Entry> {
        let product_name = self.product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(Error::InvalidEntry("product name is required".into()));
        }
        if owner_id.trim().is_empty() {
            return Err(Error::InvalidEntry("owner id is required".into()));
        }

        Ok(Entry {
            id,
            product_name,
            brand: non_empty(self.brand),
            category: self.category,
            rating: self.rating,
            notes: non_empty(self.notes),
            owner_id: owner_id.to_string(),
            created_at,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// カタログ候補を選択したときに呼び出し側へ渡す自動入力値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub brand: String,
    pub category: Option<CategoryTag>,
}

impl Suggestion {
    /// 下書きに反映する。カテゴリが推定できなかった場合は既存値を残す
    pub fn apply_to(&self, draft: &mut EntryDraft) {
        draft.product_name = self.name.clone();
        draft.brand = self.brand.clone();
        if let Some(category) = self.category {
            draft.category = category;
        }
    }
}
