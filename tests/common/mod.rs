#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 12] = [
    "debtor_iban",
    "debtor_name",
    "debtor_bic",
    "creditor_iban",
    "creditor_name",
    "creditor_bic",
    "amount",
    "currency",
    "execution_date",
    "remittance_information",
    "end_to_end_id",
    "priority",
];

pub const DEBTOR_IBAN: &str = "ES9121000418450200051332";
pub const CREDITOR_IBAN: &str = "ES7921000813610123456789";
pub const FUTURE_DATE: &str = "2099-12-31";

/// A valid instruction row with the given amount, currency, date and token.
pub fn row(amount: &str, currency: &str, execution_date: &str, token: &str) -> [String; 12] {
    [
        DEBTOR_IBAN,
        "John Doe",
        "",
        CREDITOR_IBAN,
        "Jane Smith",
        "",
        amount,
        currency,
        execution_date,
        "Invoice",
        token,
        "",
    ]
    .map(str::to_string)
}

pub fn write_instructions(path: &Path, rows: &[[String; 12]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` valid instructions, each with its own end-to-end id.
pub fn generate_instructions(path: &Path, rows: usize) -> Result<(), Error> {
    let rows: Vec<_> = (1..=rows)
        .map(|i| row("10.00", "EUR", FUTURE_DATE, &format!("E2E-{:06}", i)))
        .collect();
    write_instructions(path, &rows)
}
