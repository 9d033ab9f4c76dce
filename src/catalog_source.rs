//! カタログ読み込みモジュール
//!
//! CSV、または表計算ファイル（xlsx/xls/ods の先頭シート）から製品カタログを読み込む。
//! 読み込みに失敗しても入力フォームは止めず、空カタログで続行する。

use crate::error::SkinLogError;
use anyhow::Context;
use calamine::{open_workbook_auto, Reader};
use skin_log_common::Catalog;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

const SHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 表計算ファイルか（拡張子で判定）
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SHEET_EXTENSIONS.contains(&ext.as_str()))
}

/// カタログを読み込む
pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    if !path.exists() {
        return Err(SkinLogError::FileNotFound(path.display().to_string()).into());
    }

    let catalog = if is_spreadsheet(path) {
        load_spreadsheet(path)?
    } else {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(path = %path.display(), "catalog is not valid UTF-8; invalid bytes were replaced");
        }
        Catalog::from_csv_str(&content)
    };

    debug!(
        path = %path.display(),
        records = catalog.len(),
        skipped = catalog.skipped(),
        "catalog loaded"
    );

    Ok(catalog)
}

fn load_spreadsheet(path: &Path) -> anyhow::Result<Catalog> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("open {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SkinLogError::CatalogLoad(format!("no worksheet in {}", path.display())))?
        .with_context(|| format!("read first sheet of {}", path.display()))?;

    // ヘッダー行をスキップ、空行は除外
    let rows: Vec<Vec<String>> = range
        .rows()
        .skip(1)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .collect();

    Ok(Catalog::from_rows(rows))
}

/// カタログを読み込む。失敗時は警告を出して空カタログを返す
pub fn load_catalog_or_empty(path: Option<&Path>) -> Catalog {
    let Some(path) = path else {
        warn!("catalog path is not configured; search will return no results");
        return Catalog::empty();
    };

    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(path = %path.display(), error = ?e, "failed to load catalog; continuing with empty catalog");
            Catalog::empty()
        }
    }
}
