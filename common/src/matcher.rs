//! カタログ照合モジュール
//!
//! 入力中のクエリで製品カタログをスコアリングし、上位候補を返す。
//! 製品の種類文字列からカテゴリを推定する補助関数も持つ。
//!
//! ## スコア（クエリの単語ごと、先に当たった段のみ加点）
//! | 条件 | 点 |
//! |------|----|
//! | brand 完全一致 | 100 |
//! | brand 前方一致 | 50 |
//! | brand 部分一致 | 30 |
//! | type 部分一致 | 20 |
//! | name 部分一致 | 10 |
//!
//! 全単語が何かに当たった場合は +50。
//! 同点の並びはカタログ順を維持する（安定ソート）。

use crate::types::{CatalogRecord, CategoryTag};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// 検索を行う最小文字数（trim後）
pub const MIN_QUERY_CHARS: usize = 2;
/// 返す候補の上限
pub const MAX_RESULTS: usize = 15;
/// 全単語一致ボーナス
pub const ALL_WORDS_BONUS: u32 = 50;

const BRAND_EXACT: u32 = 100;
const BRAND_PREFIX: u32 = 50;
const BRAND_CONTAINS: u32 = 30;
const TYPE_CONTAINS: u32 = 20;
const NAME_CONTAINS: u32 = 10;

/// スコア付き候補
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub record: &'a CatalogRecord,
    pub score: u32,
}

/// 照合用に小文字化したフィールド
#[derive(Debug, Clone)]
pub struct MatchFields {
    brand: String,
    name: String,
    product_type: String,
}

impl MatchFields {
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            brand: record.brand.to_lowercase(),
            name: record.name.to_lowercase(),
            product_type: record.product_type.to_lowercase(),
        }
    }
}

/// クエリを小文字化して空白区切りの単語に分ける（重複は残す）
pub fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// 最小文字数に満たないクエリか
pub fn is_below_min_length(query: &str) -> bool {
    query.trim().chars().count() < MIN_QUERY_CHARS
}

/// 1単語の得点。どの段にも当たらなければ None
pub fn score_word(word: &str, fields: &MatchFields) -> Option<u32> {
    if fields.brand == word {
        Some(BRAND_EXACT)
    } else if fields.brand.starts_with(word) {
        Some(BRAND_PREFIX)
    } else if fields.brand.contains(word) {
        Some(BRAND_CONTAINS)
    } else if fields.product_type.contains(word) {
        Some(TYPE_CONTAINS)
    } else if fields.name.contains(word) {
        Some(NAME_CONTAINS)
    } else {
        None
    }
}

/// レコード全体の得点。1単語も当たらなければ None
pub fn score_record(words: &[String], record: &CatalogRecord) -> Option<u32> {
    let fields = MatchFields::from_record(record);

    let hits: Vec<u32> = words
        .iter()
        .filter_map(|word| score_word(word, &fields))
        .collect();

    if hits.is_empty() {
        return None;
    }

    let mut score: u32 = hits.iter().sum();
    if hits.len() == words.len() {
        score += ALL_WORDS_BONUS;
    }

    Some(score)
}

/// スコア付きで検索（降順・上限15件）
pub fn search_scored<'a>(query: &str, catalog: &'a [CatalogRecord]) -> Vec<ScoredCandidate<'a>> {
    if is_below_min_length(query) {
        return Vec::new();
    }

    let words = query_words(query);
    if words.is_empty() {
        return Vec::new();
    }

    let score_one = |record: &'a CatalogRecord| {
        score_record(&words, record).map(|score| ScoredCandidate { record, score })
    };

    // par_iter().collect() もカタログ順を保つ
    #[cfg(feature = "parallel")]
    let mut candidates: Vec<ScoredCandidate<'a>> = catalog.par_iter().filter_map(score_one).collect();
    #[cfg(not(feature = "parallel"))]
    let mut candidates: Vec<ScoredCandidate<'a>> = catalog.iter().filter_map(score_one).collect();

    // 安定ソート: 同点はカタログ順
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(MAX_RESULTS);
    candidates
}

/// 検索して候補レコードのみを返す
pub fn search<'a>(query: &str, catalog: &'a [CatalogRecord]) -> Vec<&'a CatalogRecord> {
    search_scored(query, catalog)
        .into_iter()
        .map(|candidate| candidate.record)
        .collect()
}

/// カテゴリ推定のキーワード。上から順に判定し最初に当たったものを採用
const CATEGORY_KEYWORDS: &[(CategoryTag, &[&str])] = &[
    (CategoryTag::Cleanser, &["cleanser"]),
    (CategoryTag::Moisturizer, &["moisturizer", "cream", "lotion"]),
    (CategoryTag::Serum, &["serum"]),
    (CategoryTag::Sunscreen, &["sunscreen", "spf"]),
    (CategoryTag::Treatment, &["treatment", "toner", "exfoliant"]),
];

/// 種類文字列からカテゴリを推定する
///
/// どれにも当たらなければ None（Other にはしない。呼び出し側が既存値を保持する）
pub fn classify(type_text: &str) -> Option<CategoryTag> {
    let lower = type_text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tag, _)| *tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(brand: &str, name: &str, product_type: &str) -> MatchFields {
        MatchFields::from_record(&CatalogRecord::new(brand, name, product_type))
    }

    #[test]
    fn test_score_word_tiers() {
        let f = fields("CeraVe", "Foaming Facial Cleanser", "gel cleanser");
        assert_eq!(score_word("cerave", &f), Some(100));
        assert_eq!(score_word("cera", &f), Some(50));
        assert_eq!(score_word("rav", &f), Some(30));
        assert_eq!(score_word("gel", &f), Some(20));
        assert_eq!(score_word("foaming", &f), Some(10));
        assert_eq!(score_word("retinol", &f), None);
    }

    #[test]
    fn test_type_tier_wins_over_name() {
        // "cleanser" は type と name の両方に含まれるが type の20点のみ
        let f = fields("CeraVe", "Foaming Facial Cleanser", "gel cleanser");
        assert_eq!(score_word("cleanser", &f), Some(20));
    }

    #[test]
    fn test_score_record_partial_match_no_bonus() {
        let record = CatalogRecord::new("CeraVe", "Moisturizing Cream", "cream");
        let words = query_words("cerave retinol");
        assert_eq!(score_record(&words, &record), Some(100));
    }

    #[test]
    fn test_score_record_duplicate_words_count_twice() {
        let record = CatalogRecord::new("CeraVe", "Moisturizing Cream", "cream");
        let words = query_words("cerave cerave");
        assert_eq!(score_record(&words, &record), Some(100 + 100 + 50));
    }

    #[test]
    fn test_score_record_no_match() {
        let record = CatalogRecord::new("CeraVe", "Moisturizing Cream", "cream");
        assert_eq!(score_record(&query_words("retinol"), &record), None);
    }

    #[test]
    fn test_query_words_collapses_whitespace() {
        assert_eq!(query_words("  CeraVe \t Moist\n"), vec!["cerave", "moist"]);
    }

    #[test]
    fn test_min_length_counts_chars_after_trim() {
        assert!(is_below_min_length(" a "));
        assert!(is_below_min_length(""));
        assert!(!is_below_min_length("ab"));
        assert!(is_below_min_length("肌"));
        assert!(!is_below_min_length("肌ラ"));
    }

    #[test]
    fn test_search_round_trip_example() {
        let catalog = vec![CatalogRecord::new("CeraVe", "Moisturizing Cream", "cream")];
        let results = search_scored("cerave moist", &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 160);
        assert_eq!(results[0].record.name, "Moisturizing Cream");
    }

    #[test]
    fn test_search_orders_by_score_then_catalog_order() {
        let catalog = vec![
            CatalogRecord::new("Glow Recipe", "Watermelon Toner", "toner"),
            CatalogRecord::new("Paula's Choice", "BHA Toner", "exfoliant"),
            CatalogRecord::new("Toner Lab", "Daily Mist", "mist"),
            CatalogRecord::new("Klairs", "Supple Toner", "toner"),
        ];
        let results = search_scored("toner", &catalog);
        let brands: Vec<&str> = results.iter().map(|c| c.record.brand.as_str()).collect();
        // Toner Lab: 前方一致50+50, Glow Recipe/Klairs: type20+50, Paula's: name10+50
        assert_eq!(brands, vec!["Toner Lab", "Glow Recipe", "Klairs", "Paula's Choice"]);
        assert_eq!(results[0].score, 100);
        assert_eq!(results[1].score, 70);
        assert_eq!(results[3].score, 60);
    }

    #[test]
    fn test_search_whitespace_only_query() {
        let catalog = vec![CatalogRecord::new("CeraVe", "Moisturizing Cream", "cream")];
        assert!(search("    ", &catalog).is_empty());
    }

    #[test]
    fn test_classify_rules() {
        assert_eq!(classify("Gel Cleanser"), Some(CategoryTag::Cleanser));
        assert_eq!(classify("night cream"), Some(CategoryTag::Moisturizer));
        assert_eq!(classify("body lotion"), Some(CategoryTag::Moisturizer));
        assert_eq!(classify("Vitamin C Serum"), Some(CategoryTag::Serum));
        assert_eq!(classify("SPF 50 fluid"), Some(CategoryTag::Sunscreen));
        assert_eq!(classify("chemical exfoliant"), Some(CategoryTag::Treatment));
        assert_eq!(classify("hydrating toner"), Some(CategoryTag::Treatment));
    }

    #[test]
    fn test_classify_order_is_tie_break() {
        assert_eq!(classify("moisturizing cream cleanser"), Some(CategoryTag::Cleanser));
        // "sunscreen cream" は moisturizer が先に評価される
        assert_eq!(classify("sunscreen cream"), Some(CategoryTag::Moisturizer));
    }

    #[test]
    fn test_classify_fallback() {
        assert_eq!(classify("essence"), None);
        assert_eq!(classify(""), None);
    }
}
