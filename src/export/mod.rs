pub mod csv;
pub mod excel;

use crate::error::{Result, TipReceiptsError};
use std::path::{Path, PathBuf};
use tip_receipts_common::ReceiptRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// ディレクトリ指定ならタイトルからファイル名を作る
pub fn output_path_for_format(output: &Path, title: &str, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// 表示中のレコードを指定形式で書き出し、出力先パスを返す
pub fn export_records(
    records: &[ReceiptRecord],
    format: ExportFormat,
    output: &Path,
    title: &str,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, title, format);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(TipReceiptsError::FileNotFound(parent.display().to_string()));
        }
    }

    match format {
        ExportFormat::Csv => self::csv::generate_csv(records, &output_path)?,
        ExportFormat::Excel => excel::generate_excel(records, &output_path, title)?,
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(records)?;
            std::fs::write(&output_path, json)?;
        }
    }

    tracing::info!(
        format = %format,
        count = records.len(),
        path = %output_path.display(),
        "exported receipts"
    );
    Ok(output_path)
}
