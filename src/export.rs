//! エントリのファイル出力

use crate::cli::ExportFormat;
use crate::error::{Result, SkinLogError};
use skin_log_common::export::excel_core;
use skin_log_common::Entry;
use std::path::{Path, PathBuf};

const SHEET_NAME: &str = "Entries";

/// 出力先が未指定・ディレクトリの場合はファイル名を補う
pub fn output_path_for_format(output: Option<&Path>, format: &ExportFormat) -> PathBuf {
    let file_name = format!("skin-log.{}", format.extension());
    match output {
        None => PathBuf::from(file_name),
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
    }
}

pub fn export_entries(entries: &[Entry], format: &ExportFormat, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(entries)?;
            std::fs::write(output_path, json)?;
        }
        ExportFormat::Excel => {
            let buffer = excel_core::generate_excel_buffer(entries, SHEET_NAME)
                .map_err(|e| SkinLogError::Export(e.to_string()))?;
            std::fs::write(output_path, buffer)?;
        }
    }

    Ok(())
}
