//! エントリ保存モジュール
//!
//! ユーザーが記録した製品エントリをJSONファイルに保存する。
//! ホスト型バックエンドの products テーブルの代わりにローカルで使う。

use crate::error::{Result, SkinLogError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skin_log_common::{Entry, EntryDraft};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// 保存ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryStore {
    /// バージョン（互換性チェック用）
    version: u32,
    entries: Vec<Entry>,
}

impl EntryStore {
    const CURRENT_VERSION: u32 = 1;

    /// 保存ファイルを読み込み（存在しなければ空）
    ///
    /// 壊れたファイルは上書きしないようにエラーを返す。
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let reader = BufReader::new(File::open(path)?);
        let store: EntryStore = serde_json::from_reader(reader)
            .map_err(|e| SkinLogError::Store(format!("{}: {}", path.display(), e)))?;

        if store.version != Self::CURRENT_VERSION {
            return Err(SkinLogError::Store(format!(
                "{}: 未対応のバージョン {}",
                path.display(),
                store.version
            )));
        }

        debug!(path = %path.display(), entries = store.entries.len(), "entry store loaded");
        Ok(store)
    }

    /// 保存ファイルを書き出し
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// 下書きからエントリを作成して追加
    pub fn create(&mut self, draft: EntryDraft, owner_id: &str, now: DateTime<Utc>) -> Result<&Entry> {
        let id = self.next_id(now);
        let entry = draft.into_entry(id, owner_id, now)?;
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// オーナーのエントリを新しい順で取得
    pub fn list_by_owner(&self, owner_id: &str) -> Vec<&Entry> {
        let mut owned: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }

    /// オーナーのエントリを複製して取得（新しい順）
    pub fn entries_for(&self, owner_id: &str) -> Vec<Entry> {
        self.list_by_owner(owner_id).into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 登録時刻ベースのID。衝突したら連番を付ける
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let base = now.format("%Y%m%d%H%M%S%3f").to_string();
        let mut id = base.clone();
        let mut suffix = 1;
        while self.entries.iter().any(|e| e.id == id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }
        id
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(name: &str) -> EntryDraft {
        EntryDraft {
            product_name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_unique_within_same_instant() {
        let mut store = EntryStore::default();
        let now = Utc.with_ymd_and_hms(2026, 1, 18, 9, 0, 0).unwrap();
        let first = store.create(draft("A"), "user-1", now).unwrap().id.clone();
        let second = store.create(draft("B"), "user-1", now).unwrap().id.clone();
        assert_ne!(first, second);
        assert!(second.ends_with("-2"));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut store = EntryStore::default();
        let result = store.create(draft("   "), "user-1", Utc::now());
        assert!(matches!(result, Err(SkinLogError::Common(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_by_owner_filters_and_orders() {
        let mut store = EntryStore::default();
        let day = |d| Utc.with_ymd_and_hms(2026, 1, d, 9, 0, 0).unwrap();
        store.create(draft("old"), "user-1", day(1)).unwrap();
        store.create(draft("other"), "user-2", day(2)).unwrap();
        store.create(draft("new"), "user-1", day(3)).unwrap();

        let names: Vec<&str> = store
            .list_by_owner("user-1")
            .iter()
            .map(|e| e.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["new", "old"]);
        assert_eq!(store.len(), 3);
    }
}
