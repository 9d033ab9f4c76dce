//! オートコンプリートのセッション状態
//!
//! - 入力変更ごとに連番チケットを発行し、古い検索結果の上書きを防ぐ
//! - 候補選択直後の1回だけ再検索を抑止する（選択で入力欄が書き換わるため）

use crate::matcher::{classify, is_below_min_length};
use crate::types::{CatalogRecord, Suggestion};

/// 検索要求。発行時点の連番を持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    pub query: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// 入力欄1つ分の検索状態
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    latest_seq: u64,
    suppress_next: bool,
    results: Vec<CatalogRecord>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力変更イベント
    ///
    /// 検索すべきときだけチケットを返す。
    /// 選択直後の変更は抑止フラグを消費して None。
    /// 最小文字数未満なら候補をクリアして None。
    pub fn on_query_change(&mut self, query: &str) -> Option<SearchTicket> {
        if std::mem::take(&mut self.suppress_next) {
            return None;
        }

        // 実行中の検索はすべて古くなる
        self.latest_seq += 1;

        if is_below_min_length(query) {
            self.results.clear();
            return None;
        }

        Some(SearchTicket {
            seq: self.latest_seq,
            query: query.to_string(),
        })
    }

    /// チケットが最新か
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// 検索結果を反映する。古いチケットの結果は捨てて false
    pub fn accept(&mut self, ticket: &SearchTicket, results: Vec<CatalogRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.results = results;
        true
    }

    /// 現在の候補
    pub fn results(&self) -> &[CatalogRecord] {
        &self.results
    }

    /// 再検索抑止が待機中か
    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }

    /// 候補を選択する
    ///
    /// 候補を閉じ、次の入力変更1回分の検索を抑止する。
    pub fn select(&mut self, record: &CatalogRecord) -> Suggestion {
        self.results.clear();
        self.suppress_next = true;
        self.latest_seq += 1;
        Suggestion::from(record)
    }

    /// 表示中の候補をインデックスで選択する
    pub fn select_index(&mut self, index: usize) -> Option<Suggestion> {
        let record = self.results.get(index)?.clone();
        Some(self.select(&record))
    }
}

impl From<&CatalogRecord> for Suggestion {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            name: record.name.clone(),
            brand: record.brand.clone(),
            category: classify(&record.product_type),
        }
    }
}
