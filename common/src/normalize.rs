//! フィールド正規化
//!
//! レシートの生の文字列値を、フィールドごとに比較可能なキーへ変換する。
//!
//! - 金額（amount / tip / total）: 記号を除去して数値化、失敗時は 0
//! - 時刻（time）: 24時間制の分数。日付が読めれば epoch ミリ秒に合成
//! - 日付（date）: `YYYY-MM-DD` に正規化、読めなければ元の文字列
//! - その他: 小文字化した文字列
//!
//! すべて純粋関数で、同じ入力には常に同じキーを返す。

use crate::types::{Field, ReceiptRecord};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::cmp::Ordering;

/// 比較用キー
///
/// 数値系（Number / Minutes / EpochMillis）同士は数値として比較し、
/// 文字列キーより常に前に並ぶ。
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    /// 0時からの経過分
    Minutes(i64),
    /// 日付と時刻を合成した UTC epoch ミリ秒
    EpochMillis(i64),
    Text(String),
}

impl SortKey {
    fn numeric(&self) -> Option<f64> {
        match self {
            SortKey::Number(n) => Some(*n),
            SortKey::Minutes(m) => Some(*m as f64),
            SortKey::EpochMillis(ms) => Some(*ms as f64),
            SortKey::Text(_) => None,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (self, other) {
                (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
                _ => Ordering::Equal,
            },
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

lazy_static::lazy_static! {
    static ref MONEY_PREFIX_RE: Regex = Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").unwrap();
    static ref TIME_RE: Regex =
        Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::\d{2})?\s*(am|pm|a\.m\.|p\.m\.)?$").unwrap();
    static ref US_DATE_RE: Regex = Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4}|\d{2})$").unwrap();
    static ref ISO_DATE_RE: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap();
}

/// 汎用日付パースで試すフォーマット
const FALLBACK_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y", "%Y/%m/%d"];

/// 金額文字列を数値化する
///
/// 数字・`.`・`-` 以外を除去し、先頭の数値部分を読む。
/// 読めなければ 0。
pub fn parse_money(raw: &str) -> f64 {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    MONEY_PREFIX_RE
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// 時刻文字列を 0時からの経過分に変換する
///
/// `"3:45 PM"` → 945、`"12:00 AM"` → 0、`"15:45"` → 945
pub fn parse_time_minutes(raw: &str) -> Option<i64> {
    let caps = TIME_RE.captures(raw.trim())?;
    let mut hours: i64 = caps[1].parse().ok()?;
    let minutes: i64 = caps[2].parse().ok()?;

    if let Some(meridiem) = caps.get(3) {
        let is_pm = meridiem.as_str().to_lowercase().starts_with('p');
        if hours > 12 {
            return None;
        }
        if hours == 12 {
            hours = 0;
        }
        if is_pm {
            hours += 12;
        }
    }

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// 日付文字列を `YYYY-MM-DD` に正規化する
///
/// `MM/DD/YYYY`, `MM-DD-YYYY`, `YYYY-MM-DD` を認識し、2桁年は 20YY とみなす。
/// いずれにも合わなければ汎用パースを試み、それも失敗したら None。
pub fn canonical_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(caps) = US_DATE_RE.captures(raw) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let mut year: i32 = caps[3].parse().ok()?;
        if caps[3].len() == 2 {
            year += 2000;
        }
        return Some(format!("{:04}-{:02}-{:02}", year, month, day));
    }

    if let Some(caps) = ISO_DATE_RE.captures(raw) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return Some(format!("{:04}-{:02}-{:02}", year, month, day));
    }

    for format in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
}

/// 日付の 0時 を UTC epoch ミリ秒で返す（暦として不正なら None）
fn date_epoch_millis(raw: &str) -> Option<i64> {
    let canonical = canonical_date(raw)?;
    let date = NaiveDate::parse_from_str(&canonical, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// フィールド名と生の値から比較キーを求める
///
/// # Arguments
/// * `field` - 対象フィールド
/// * `raw` - 生の値（欠損は None）
/// * `companion_date` - time の場合に合成する日付
pub fn normalize_value(field: &Field, raw: Option<&str>, companion_date: Option<&str>) -> SortKey {
    match field {
        Field::Amount | Field::Tip | Field::Total => {
            SortKey::Number(raw.map(parse_money).unwrap_or(0.0))
        }
        Field::Time => {
            let Some(minutes) = raw.and_then(parse_time_minutes) else {
                return SortKey::Minutes(0);
            };
            match companion_date.and_then(date_epoch_millis) {
                Some(midnight) => SortKey::EpochMillis(midnight + minutes * 60_000),
                None => SortKey::Minutes(minutes),
            }
        }
        Field::Date => {
            let raw = raw.unwrap_or_default();
            SortKey::Text(canonical_date(raw).unwrap_or_else(|| raw.to_string()))
        }
        Field::CustomerName | Field::CheckNumber | Field::PaymentType => {
            SortKey::Text(raw.unwrap_or_default().to_lowercase())
        }
        Field::Unknown(_) => SortKey::Text(String::new()),
    }
}

/// レコードの比較キー（time は同じレコードの date と合成する）
pub fn sort_key(record: &ReceiptRecord, field: &Field) -> SortKey {
    let companion_date = match field {
        Field::Time if !record.date.trim().is_empty() => Some(record.date.as_str()),
        _ => None,
    };
    normalize_value(field, field.value(record), companion_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert!((parse_money("$1,234.50") - 1234.50).abs() < 1e-9);
        assert!((parse_money("12.5") - 12.5).abs() < 1e-9);
        assert!((parse_money("-$3.25") + 3.25).abs() < 1e-9);
        assert_eq!(parse_money("n/a"), 0.0);
        assert_eq!(parse_money(""), 0.0);
    }

    #[test]
    fn test_parse_money_reads_leading_number_only() {
        assert!((parse_money("1.2.3") - 1.2).abs() < 1e-9);
        assert!((parse_money("12-3") - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_money_missing() {
        assert_eq!(normalize_value(&Field::Amount, None, None), SortKey::Number(0.0));
    }

    #[test]
    fn test_parse_time_minutes() {
        assert_eq!(parse_time_minutes("3:45 PM"), Some(15 * 60 + 45));
        assert_eq!(parse_time_minutes("3:45 pm"), Some(945));
        assert_eq!(parse_time_minutes("3:45 p.m."), Some(945));
        assert_eq!(parse_time_minutes("12:00 AM"), Some(0));
        assert_eq!(parse_time_minutes("12:00 PM"), Some(720));
        assert_eq!(parse_time_minutes("15:45"), Some(945));
        assert_eq!(parse_time_minutes("9:05:30"), Some(545));
        assert_eq!(parse_time_minutes("25:00"), None);
        assert_eq!(parse_time_minutes("noon"), None);
    }

    #[test]
    fn test_normalize_time_without_date() {
        assert_eq!(
            normalize_value(&Field::Time, Some("3:45 PM"), None),
            SortKey::Minutes(15 * 60 + 45)
        );
        assert_eq!(normalize_value(&Field::Time, Some("garbage"), None), SortKey::Minutes(0));
        assert_eq!(normalize_value(&Field::Time, None, None), SortKey::Minutes(0));
    }

    #[test]
    fn test_normalize_time_with_bad_date_falls_back_to_minutes() {
        assert_eq!(
            normalize_value(&Field::Time, Some("1:00 AM"), Some("someday")),
            SortKey::Minutes(60)
        );
        // 暦として存在しない日付
        assert_eq!(
            normalize_value(&Field::Time, Some("1:00 AM"), Some("02/30/2025")),
            SortKey::Minutes(60)
        );
    }

    #[test]
    fn test_normalize_time_with_date_is_absolute() {
        let late = normalize_value(&Field::Time, Some("11:50 PM"), Some("2025-03-17"));
        let early = normalize_value(&Field::Time, Some("12:10 AM"), Some("2025-03-18"));
        assert!(matches!(late, SortKey::EpochMillis(_)));
        assert!(late < early);
    }

    #[test]
    fn test_canonical_date() {
        assert_eq!(canonical_date("3/17/2025"), Some("2025-03-17".to_string()));
        assert_eq!(canonical_date("03-17-2025"), Some("2025-03-17".to_string()));
        assert_eq!(canonical_date("3/17/25"), Some("2025-03-17".to_string()));
        assert_eq!(canonical_date("2025-03-17"), Some("2025-03-17".to_string()));
        assert_eq!(canonical_date("2025-3-7"), Some("2025-03-07".to_string()));
        assert_eq!(canonical_date("March 17, 2025"), Some("2025-03-17".to_string()));
        assert_eq!(canonical_date("2025-03-17T10:00:00Z"), Some("2025-03-17".to_string()));
        assert_eq!(canonical_date("yesterday"), None);
    }

    #[test]
    fn test_normalize_date_falls_back_to_original() {
        assert_eq!(
            normalize_value(&Field::Date, Some("3/17/2025"), None),
            SortKey::Text("2025-03-17".to_string())
        );
        assert_eq!(
            normalize_value(&Field::Date, Some("yesterday"), None),
            SortKey::Text("yesterday".to_string())
        );
    }

    #[test]
    fn test_normalize_text_lowercases() {
        assert_eq!(
            normalize_value(&Field::CustomerName, Some("John SMITH"), None),
            SortKey::Text("john smith".to_string())
        );
        assert_eq!(normalize_value(&Field::PaymentType, None, None), SortKey::Text(String::new()));
        assert_eq!(
            normalize_value(&Field::Unknown("x".into()), Some("ABC"), None),
            SortKey::Text(String::new())
        );
    }

    #[test]
    fn test_sort_key_is_idempotent() {
        let record = ReceiptRecord {
            date: "03/17/2025".to_string(),
            time: "3:45 PM".to_string(),
            ..Default::default()
        };
        assert_eq!(sort_key(&record, &Field::Time), sort_key(&record, &Field::Time));
    }

    #[test]
    fn test_sort_key_ordering_numbers_before_text() {
        assert!(SortKey::Number(1e9) < SortKey::Text(String::new()));
        assert!(SortKey::Minutes(5) < SortKey::Number(6.0));
        assert_eq!(SortKey::Minutes(5), SortKey::Number(5.0));
    }
}
