//! レシートデータの型定義
//!
//! CLIとビューモデルで共有される型:
//! - ReceiptRecord: 画像解析APIから抽出された1枚分のレシート
//! - Field: 絞り込み・並べ替えの対象フィールド
//! - FilterSpec / SortSpec: 現在の絞り込み・並べ替え条件

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 取り込み時に採番されるレコードID（0は未採番）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 抽出済みレシート
///
/// OCR結果はノイズが多いため、全フィールドが省略可能。
/// 金額系はAPIが数値で返すこともあるので文字列に寄せて保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptRecord {
    #[serde(skip_serializing_if = "RecordId::is_unassigned")]
    pub id: RecordId,

    #[serde(alias = "customer_name")]
    pub customer_name: String,

    #[serde(alias = "check_number", deserialize_with = "string_or_number")]
    pub check_number: String,

    /// 例: "03/17/2025"
    pub date: String,

    /// 例: "3:45 PM" / "15:45"
    pub time: String,

    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,

    #[serde(deserialize_with = "string_or_number")]
    pub tip: String,

    #[serde(deserialize_with = "string_or_number")]
    pub total: String,

    #[serde(alias = "payment_type")]
    pub payment_type: String,

    pub signed: bool,

    #[serde(alias = "image_url")]
    pub image_url: String,

    /// 0.0..=1.0
    pub confidence: f64,
}

/// `"12.50"` でも `12.5` でも `null` でも受け付ける
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// 絞り込み・並べ替え対象フィールド
///
/// UIから渡されるフィールド名は固定集合だが、不正な名前でも
/// エラーにせず `Unknown` として扱う（一致なし・空文字キー）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    CustomerName,
    CheckNumber,
    Date,
    Time,
    Amount,
    Tip,
    Total,
    PaymentType,
    Unknown(String),
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::CustomerName,
        Field::CheckNumber,
        Field::Date,
        Field::Time,
        Field::Amount,
        Field::Tip,
        Field::Total,
        Field::PaymentType,
    ];

    /// snake_case / camelCase どちらのフィールド名も受け付ける
    pub fn parse(name: &str) -> Field {
        match name.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "customername" | "customer" | "name" => Field::CustomerName,
            "checknumber" | "check" => Field::CheckNumber,
            "date" => Field::Date,
            "time" => Field::Time,
            "amount" => Field::Amount,
            "tip" => Field::Tip,
            "total" => Field::Total,
            "paymenttype" | "payment" => Field::PaymentType,
            _ => Field::Unknown(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Field::CustomerName => "customer_name",
            Field::CheckNumber => "check_number",
            Field::Date => "date",
            Field::Time => "time",
            Field::Amount => "amount",
            Field::Tip => "tip",
            Field::Total => "total",
            Field::PaymentType => "payment_type",
            Field::Unknown(name) => name,
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> &str {
        match self {
            Field::CustomerName => "Customer",
            Field::CheckNumber => "Check #",
            Field::Date => "Date",
            Field::Time => "Time",
            Field::Amount => "Amount",
            Field::Tip => "Tip",
            Field::Total => "Total",
            Field::PaymentType => "Payment",
            Field::Unknown(name) => name,
        }
    }

    pub fn is_monetary(&self) -> bool {
        matches!(self, Field::Amount | Field::Tip | Field::Total)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Field::Unknown(_))
    }

    /// レコードからフィールドの生の値を取得（未知のフィールドは None）
    pub fn value<'a>(&self, record: &'a ReceiptRecord) -> Option<&'a str> {
        let value = match self {
            Field::CustomerName => &record.customer_name,
            Field::CheckNumber => &record.check_number,
            Field::Date => &record.date,
            Field::Time => &record.time,
            Field::Amount => &record.amount,
            Field::Tip => &record.tip,
            Field::Total => &record.total,
            Field::PaymentType => &record.payment_type,
            Field::Unknown(_) => return None,
        };
        Some(value.as_str())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::parse(&name)
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.as_str().to_string()
    }
}

impl FromStr for Field {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Field::parse(s))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 並べ替え方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" | "a" => Ok(SortDirection::Asc),
            "desc" | "descending" | "d" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown direction: {}. Use asc or desc", s)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// 表示モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Slideshow,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" | "g" => Ok(ViewMode::Grid),
            "slideshow" | "slides" | "s" => Ok(ViewMode::Slideshow),
            _ => Err(format!("Unknown view mode: {}. Use grid or slideshow", s)),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::Slideshow => write!(f, "slideshow"),
        }
    }
}

/// 絞り込み条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: Field,
    pub query: String,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            field: Field::CustomerName,
            query: String::new(),
        }
    }
}

/// 並べ替え条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: Field::Date,
            direction: SortDirection::Asc,
        }
    }
}
