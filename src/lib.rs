//! スキンケア製品の使用記録ツール
//!
//! 製品カタログの検索・カテゴリ推定は `skin-log-common` にあり、
//! このクレートは設定、カタログ読み込み、エントリ保存、対話入力を担う。

pub mod autocomplete;
pub mod catalog_source;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod prompt;
pub mod store;
