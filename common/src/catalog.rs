//! 製品カタログモジュール
//!
//! 同梱の製品一覧（CSV / 表計算シート）を読み込み、検索用に保持する。
//! 列順は brand, name, type, country, ingredients, afterUse 固定。
//! 読み込み後は読み取り専用。

use crate::types::CatalogRecord;
use serde::{Deserialize, Serialize};

/// 読み込み済みカタログ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    /// brand/name が取れずに除外した行数
    skipped: usize,
}

impl Catalog {
    /// 空のカタログ（読み込み失敗時のフォールバック）
    pub fn empty() -> Self {
        Self::default()
    }

    /// CSV文字列から読み込み
    ///
    /// 1行目はヘッダーとしてスキップ。空行は数えない。
    /// brand か name が空の行は黙って除外する。
    pub fn from_csv_str(content: &str) -> Self {
        let rows = content
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(parse_csv_line);

        Self::from_rows(rows)
    }

    /// 分割済みの行から読み込み（ヘッダーは含めない）
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut skipped = 0;

        for row in rows {
            let mut fields = row.into_iter().map(|f| clean_field(f.as_ref()));
            let mut next = || fields.next().unwrap_or_default();

            let record = CatalogRecord {
                brand: next(),
                name: next(),
                product_type: next(),
                country: next(),
                ingredients: next(),
                after_use: next(),
            };

            if record.is_searchable() {
                records.push(record);
            } else {
                skipped += 1;
            }
        }

        Self { records, skipped }
    }

    /// レコード一覧から作成（検索不可のものは除外）
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let total = records.len();
        let records: Vec<_> = records.into_iter().filter(|r| r.is_searchable()).collect();
        let skipped = total - records.len();
        Self { records, skipped }
    }

    /// 全レコードを取得
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 除外した行数
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// CSV行をパース
///
/// 先頭（空白を除く）が `"` のフィールドだけをクォート扱いにし、その中のカンマは区切らない。
/// クォート内の `""` はリテラルの `"`。クォートなしフィールド中の `"` はそのまま残す。
fn parse_csv_line(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut field_start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek().is_some_and(|&(_, next)| next == '"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(&line[field_start..i]);
                field_start = i + c.len_utf8();
                at_field_start = true;
            }
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            c if c.is_whitespace() => {}
            _ => at_field_start = false,
        }
    }
    fields.push(&line[field_start..]);

    fields
}

/// 前後の空白を除去。クォート付きなら外側のクォートを外して `""` を戻す
fn clean_field(s: &str) -> String {
    let s = s.trim();
    match s.strip_prefix('"') {
        Some(inner) => {
            let inner = inner.strip_suffix('"').unwrap_or(inner);
            inner.replace("\"\"", "\"").trim().to_string()
        }
        None => s.to_string(),
    }
}
