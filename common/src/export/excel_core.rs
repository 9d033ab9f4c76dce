//! Excel生成（共通ライブラリ）
//!
//! エントリ一覧を1シートの表としてバッファに書き出す。

use crate::error::{Error, Result};
use crate::types::Entry;
use rust_xlsxwriter::*;

/// 列定義
pub struct ExportColumn {
    pub key: &'static str,
    pub label: &'static str,
    pub width: f64,
}

pub const EXPORT_COLUMNS: &[ExportColumn] = &[
    ExportColumn { key: "createdAt", label: "Date", width: 12.0 },
    ExportColumn { key: "productName", label: "Product", width: 32.0 },
    ExportColumn { key: "brand", label: "Brand", width: 20.0 },
    ExportColumn { key: "category", label: "Category", width: 14.0 },
    ExportColumn { key: "rating", label: "Rating", width: 14.0 },
    ExportColumn { key: "notes", label: "Notes", width: 48.0 },
];

/// セルの値を取得
fn get_field_value(entry: &Entry, key: &str) -> String {
    match key {
        "createdAt" => entry.created_at.format("%Y-%m-%d").to_string(),
        "productName" => entry.product_name.clone(),
        "brand" => entry.brand.clone().unwrap_or_default(),
        "category" => entry.category.label().to_string(),
        "rating" => entry.rating.label().to_string(),
        "notes" => entry.notes.clone().unwrap_or_default(),
        _ => "-".to_string(),
    }
}

fn xlsx_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Export(format!("{}: {}", context, e))
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `entries` - 出力するエントリ（並び順はそのまま）
/// * `sheet_name` - シート名
pub fn generate_excel_buffer(entries: &[Entry], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(xlsx_err("シート名設定エラー"))?;

    for (col, column) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, column.width)
            .map_err(xlsx_err("列幅設定エラー"))?;
        worksheet
            .write_string_with_format(0, col, column.label, &header_format)
            .map_err(xlsx_err("ヘッダー書き込みエラー"))?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, column) in EXPORT_COLUMNS.iter().enumerate() {
            let value = get_field_value(entry, column.key);
            worksheet
                .write_string_with_format(row, col as u16, &value, &value_format)
                .map_err(xlsx_err("値書き込みエラー"))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(xlsx_err("ウィンドウ枠固定エラー"))?;

    workbook
        .save_to_buffer()
        .map_err(xlsx_err("Excel保存エラー"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryTag, Rating};
    use chrono::{TimeZone, Utc};

    fn entry() -> Entry {
        Entry {
            id: "e1".into(),
            product_name: "Moisturizing Cream".into(),
            brand: Some("CeraVe".into()),
            category: CategoryTag::Moisturizer,
            rating: Rating::LovedIt,
            notes: None,
            owner_id: "user-1".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 18, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_field_values() {
        let e = entry();
        assert_eq!(get_field_value(&e, "createdAt"), "2026-01-18");
        assert_eq!(get_field_value(&e, "rating"), "Loved It");
        assert_eq!(get_field_value(&e, "notes"), "");
        assert_eq!(get_field_value(&e, "unknown"), "-");
    }

    #[test]
    fn test_generate_buffer_is_zip() {
        let buffer = generate_excel_buffer(&[entry()], "Entries").unwrap();
        // xlsx は ZIP コンテナ
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_buffer_empty() {
        let buffer = generate_excel_buffer(&[], "Entries").unwrap();
        assert!(!buffer.is_empty());
    }
}
