use thiserror::Error;

#[derive(Error, Debug)]
pub enum TipReceiptsError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Common(#[from] tip_receipts_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TipReceiptsError>;
