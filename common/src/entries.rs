//! エントリ一覧の絞り込み・並び替え

use crate::types::{CategoryTag, Entry, Rating};
use serde::{Deserialize, Serialize};

/// 一覧の並び順
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// 登録日時の新しい順
    #[default]
    Date,
    /// 製品名順（大文字小文字を区別しない）
    Name,
}

/// 絞り込み条件。None は「すべて」
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub search: String,
    pub category: Option<CategoryTag>,
    pub rating: Option<Rating>,
}

impl EntryFilter {
    /// 条件が1つでも指定されているか
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category.is_some() || self.rating.is_some()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || entry.product_name.to_lowercase().contains(&term)
            || entry
                .brand
                .as_deref()
                .is_some_and(|brand| brand.to_lowercase().contains(&term));

        let matches_category = self.category.map_or(true, |c| entry.category == c);
        let matches_rating = self.rating.map_or(true, |r| entry.rating == r);

        matches_search && matches_category && matches_rating
    }
}

/// 絞り込みと並び替えを行う
pub fn filter_entries<'a>(entries: &'a [Entry], filter: &EntryFilter, sort: SortBy) -> Vec<&'a Entry> {
    let mut filtered: Vec<&Entry> = entries.iter().filter(|e| filter.matches(e)).collect();

    match sort {
        SortBy::Date => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Name => filtered.sort_by(|a, b| {
            a.product_name
                .to_lowercase()
                .cmp(&b.product_name.to_lowercase())
        }),
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, brand: Option<&str>, category: CategoryTag, rating: Rating, day: u32) -> Entry {
        Entry {
            id: format!("id-{}", day),
            product_name: name.into(),
            brand: brand.map(str::to_string),
            category,
            rating,
            notes: None,
            owner_id: "user-1".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("Moisturizing Cream", Some("CeraVe"), CategoryTag::Moisturizer, Rating::LovedIt, 3),
            entry("azelaic acid", Some("The Ordinary"), CategoryTag::Treatment, Rating::BrokeMeOut, 10),
            entry("Sunscreen Fluid", None, CategoryTag::Sunscreen, Rating::LovedIt, 5),
        ]
    }

    #[test]
    fn test_default_sort_newest_first() {
        let entries = sample();
        let result = filter_entries(&entries, &EntryFilter::default(), SortBy::Date);
        let days: Vec<&str> = result.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(days, vec!["id-10", "id-5", "id-3"]);
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let entries = sample();
        let result = filter_entries(&entries, &EntryFilter::default(), SortBy::Name);
        let names: Vec<&str> = result.iter().map(|e| e.product_name.as_str()).collect();
        assert_eq!(names, vec!["azelaic acid", "Moisturizing Cream", "Sunscreen Fluid"]);
    }

    #[test]
    fn test_search_matches_brand() {
        let entries = sample();
        let filter = EntryFilter {
            search: "cera".into(),
            ..Default::default()
        };
        let result = filter_entries(&entries, &filter, SortBy::Date);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].product_name, "Moisturizing Cream");
    }

    #[test]
    fn test_filters_combine() {
        let entries = sample();
        let filter = EntryFilter {
            search: String::new(),
            category: Some(CategoryTag::Sunscreen),
            rating: Some(Rating::LovedIt),
        };
        assert!(filter.is_active());
        let result = filter_entries(&entries, &filter, SortBy::Date);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].product_name, "Sunscreen Fluid");
    }

    #[test]
    fn test_no_match() {
        let entries = sample();
        let filter = EntryFilter {
            rating: Some(Rating::Neutral),
            ..Default::default()
        };
        assert!(filter_entries(&entries, &filter, SortBy::Date).is_empty());
        assert!(!EntryFilter::default().is_active());
    }
}
