use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkinLogError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("オーナーIDが設定されていません。`skin-log config --set-owner YOUR_ID` で設定してください")]
    MissingOwner,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("カタログ読み込みエラー: {0}")]
    CatalogLoad(String),

    #[error("エントリ保存先が不正: {0}")]
    Store(String),

    #[error("入力が不正: {0}")]
    InvalidArgument(String),

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] skin_log_common::Error),
}

pub type Result<T> = std::result::Result<T, SkinLogError>;
