//! Tip Receipts Common Library
//!
//! レシート抽出結果の型と、正規化・絞り込み・並べ替えのパイプライン

pub mod types;
pub mod error;
pub mod normalize;
pub mod filter;
pub mod sort;
pub mod parser;
pub mod export;

pub use types::{Field, FilterSpec, ReceiptRecord, RecordId, SortDirection, SortSpec, ViewMode};
pub use error::{Error, Result};
pub use normalize::{canonical_date, normalize_value, parse_money, parse_time_minutes, sort_key, SortKey};
pub use filter::filter_records;
pub use sort::sort_records;
pub use parser::{extract_json, parse_receipt_response};
