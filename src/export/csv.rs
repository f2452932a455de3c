//! CSV生成

use crate::error::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tip_receipts_common::ReceiptRecord;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Customer")]
    customer_name: &'a str,
    #[serde(rename = "Check #")]
    check_number: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Time")]
    time: &'a str,
    #[serde(rename = "Amount")]
    amount: &'a str,
    #[serde(rename = "Tip")]
    tip: &'a str,
    #[serde(rename = "Total")]
    total: &'a str,
    #[serde(rename = "Payment")]
    payment_type: &'a str,
    #[serde(rename = "Signed")]
    signed: &'a str,
    #[serde(rename = "Image")]
    image_url: &'a str,
}

impl<'a> From<&'a ReceiptRecord> for CsvRow<'a> {
    fn from(r: &'a ReceiptRecord) -> Self {
        Self {
            customer_name: &r.customer_name,
            check_number: &r.check_number,
            date: &r.date,
            time: &r.time,
            amount: &r.amount,
            tip: &r.tip,
            total: &r.total,
            payment_type: &r.payment_type,
            signed: if r.signed { "yes" } else { "no" },
            image_url: &r.image_url,
        }
    }
}

const HEADERS: [&str; 10] = [
    "Customer", "Check #", "Date", "Time", "Amount", "Tip", "Total", "Payment", "Signed", "Image",
];

/// 任意の書き込み先へCSVを出力（0件でもヘッダー行は書く）
pub fn write_csv<W: Write>(records: &[ReceiptRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn generate_csv(records: &[ReceiptRecord], output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv(records, std::io::BufWriter::new(file))
}
