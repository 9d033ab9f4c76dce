//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use skin_log::error::SkinLogError;
use skin_log::store::EntryStore;
use tempfile::tempdir;

/// 壊れた保存ファイルは上書きせずエラー
#[test]
fn test_corrupt_store_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("entries.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = EntryStore::load(&path);
    assert!(matches!(result, Err(SkinLogError::Store(_))));
}

/// 未対応バージョンの保存ファイル
#[test]
fn test_unknown_store_version() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("entries.json");
    std::fs::write(&path, r#"{"version": 99, "entries": []}"#).unwrap();

    let err = EntryStore::load(&path).unwrap_err();
    assert!(matches!(err, SkinLogError::Store(_)));
    assert!(format!("{}", err).contains("99"));
}

/// SkinLogErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SkinLogError::Config("テスト設定エラー".to_string()),
        SkinLogError::FileNotFound("products.csv".to_string()),
        SkinLogError::CatalogLoad("読み込み失敗".to_string()),
        SkinLogError::Store("entries.json".to_string()),
        SkinLogError::InvalidArgument("空".to_string()),
        SkinLogError::Export("xlsx".to_string()),
        SkinLogError::Prompt("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingOwnerエラーのメッセージ確認
#[test]
fn test_missing_owner_message() {
    let display = format!("{}", SkinLogError::MissingOwner);
    assert!(display.contains("オーナーID"));
    assert!(display.contains("skin-log config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SkinLogError = io_err.into();

    assert!(matches!(err, SkinLogError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SkinLogError = json_err.into();

    assert!(matches!(err, SkinLogError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = skin_log_common::Error::InvalidEntry("product name is required".to_string());
    let err: SkinLogError = common_err.into();

    assert!(matches!(err, SkinLogError::Common(_)));
    assert_eq!(format!("{}", err), "Invalid entry: product name is required");
}
