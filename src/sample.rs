//! デモ用のレシート生成
//!
//! 画像解析APIを呼ばずに画面や出力を確認するための固定データ。
//! 同じ件数なら毎回同じ内容になる。

use tip_receipts_common::ReceiptRecord;

const NAMES: &[&str] = &[
    "John Smith",
    "Jane Doe",
    "Bob Smithson",
    "Maria Garcia",
    "Wei Chen",
    "Aisha Khan",
    "Tom O'Brien",
];

const PAYMENT_TYPES: &[&str] = &["Visa", "Mastercard", "Amex", "Cash", "Discover"];

/// チップ率（%）
const TIP_RATES: &[u32] = &[15, 18, 20, 22, 25];

pub fn generate(count: usize) -> Vec<ReceiptRecord> {
    (0..count)
        .map(|i| {
            let cents = 1_250 + (i as u64 * 3_719) % 14_000;
            let rate = TIP_RATES[i % TIP_RATES.len()] as u64;
            let tip_cents = (cents * rate + 50) / 100;
            let day = 1 + (i * 5) % 28;
            let hour = 11 + (i * 7) % 12;
            let minute = (i * 13) % 60;

            ReceiptRecord {
                customer_name: NAMES[i % NAMES.len()].to_string(),
                check_number: format!("{}", 1001 + i),
                date: format!("03/{:02}/2025", day),
                time: format!(
                    "{}:{:02} {}",
                    if hour > 12 { hour - 12 } else { hour },
                    minute,
                    if hour >= 12 { "PM" } else { "AM" }
                ),
                amount: format_cents(cents),
                tip: format_cents(tip_cents),
                total: format_cents(cents + tip_cents),
                payment_type: PAYMENT_TYPES[i % PAYMENT_TYPES.len()].to_string(),
                signed: i % 4 != 3,
                image_url: format!("sample://receipt-{:03}.jpg", i + 1),
                confidence: 0.7 + ((i * 11) % 30) as f64 / 100.0,
                ..Default::default()
            }
        })
        .collect()
}

fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tip_receipts_common::parse_money;

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate(10), generate(10));
        assert_eq!(generate(0).len(), 0);
    }

    #[test]
    fn test_generated_totals_add_up() {
        for record in generate(20) {
            let sum = parse_money(&record.amount) + parse_money(&record.tip);
            assert!((sum - parse_money(&record.total)).abs() < 0.001);
            assert!(tip_receipts_common::parse_time_minutes(&record.time).is_some());
            assert!(tip_receipts_common::canonical_date(&record.date).is_some());
        }
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1250), "$12.50");
        assert_eq!(format_cents(7), "$0.07");
    }
}
