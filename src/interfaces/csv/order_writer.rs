use crate::domain::payment_order::PaymentOrder;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Full CSV projection of a payment order.
#[derive(Debug, Serialize)]
struct OrderRecord<'a> {
    payment_order_id: &'a str,
    debtor_iban: &'a str,
    debtor_name: &'a str,
    debtor_bic: Option<&'a str>,
    creditor_iban: &'a str,
    creditor_name: &'a str,
    creditor_bic: Option<&'a str>,
    amount: Decimal,
    currency: &'a str,
    execution_date: NaiveDate,
    remittance_information: Option<&'a str>,
    end_to_end_id: Option<&'a str>,
    priority: &'a str,
    status: &'a str,
    status_reason: Option<&'a str>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> From<&'a PaymentOrder> for OrderRecord<'a> {
    fn from(order: &'a PaymentOrder) -> Self {
        Self {
            payment_order_id: order.payment_order_id(),
            debtor_iban: order.debtor().identification(),
            debtor_name: order.debtor().name(),
            debtor_bic: order.debtor().institution_code(),
            creditor_iban: order.creditor().identification(),
            creditor_name: order.creditor().name(),
            creditor_bic: order.creditor().institution_code(),
            amount: order.amount().value(),
            currency: order.amount().currency(),
            execution_date: order.execution_date(),
            remittance_information: order.remittance_information(),
            end_to_end_id: order.end_to_end_id(),
            priority: order.priority().as_str(),
            status: order.status().as_str(),
            status_reason: order.status_reason(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// Status-only CSV projection of a payment order.
#[derive(Debug, Serialize)]
struct StatusRecord<'a> {
    payment_order_id: &'a str,
    status: &'a str,
    status_reason: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

/// Writes payment orders as CSV.
///
/// The header row is taken from the first record written, so a single writer
/// should emit either full orders or status projections, not both.
pub struct PaymentOrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentOrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_order(&mut self, order: &PaymentOrder) -> Result<()> {
        self.writer.serialize(OrderRecord::from(order))?;
        Ok(())
    }

    pub fn write_status(&mut self, order: &PaymentOrder) -> Result<()> {
        self.writer.serialize(StatusRecord {
            payment_order_id: order.payment_order_id(),
            status: order.status().as_str(),
            status_reason: order.status_reason(),
            updated_at: order.updated_at(),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountReference;
    use crate::domain::command::InitiatePaymentOrderCommand;
    use crate::domain::money::MonetaryAmount;
    use crate::domain::payment_order::PaymentOrderStatus;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn order() -> PaymentOrder {
        let now = Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap();
        let command = InitiatePaymentOrderCommand {
            debtor: AccountReference::new("ES9121000418450200051332", "John Doe", None),
            creditor: AccountReference::new(
                "ES7921000813610123456789",
                "Jane Smith",
                Some("CAIXESBBXXX".to_string()),
            ),
            amount: MonetaryAmount::new(dec!(1500.50), "EUR"),
            execution_date: now.date_naive() + Duration::days(1),
            remittance_information: None,
            end_to_end_id: Some("E2E-001".to_string()),
            priority: None,
        };
        PaymentOrder::create("PO-2025110312000000001", command, now).unwrap()
    }

    fn written(f: impl FnOnce(&mut PaymentOrderWriter<&mut Vec<u8>>)) -> String {
        let mut buffer = Vec::new();
        {
            let mut writer = PaymentOrderWriter::new(&mut buffer);
            f(&mut writer);
            writer.flush().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_order_row() {
        let output = written(|w| w.write_order(&order()).unwrap());
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("payment_order_id,debtor_iban,debtor_name,debtor_bic,creditor_iban,creditor_name,creditor_bic,amount,currency,execution_date,remittance_information,end_to_end_id,priority,status,status_reason,created_at,updated_at")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with(
            "PO-2025110312000000001,ES9121000418450200051332,John Doe,,ES7921000813610123456789,Jane Smith,CAIXESBBXXX,1500.50,EUR,2025-11-04,,E2E-001,NORMAL,PENDING,,"
        ));
    }

    #[test]
    fn test_write_status_row() {
        let processing = order()
            .transition(
                PaymentOrderStatus::Processing,
                Some("Picked up".to_string()),
                Utc.with_ymd_and_hms(2025, 11, 3, 13, 0, 0).unwrap(),
            )
            .unwrap();
        let output = written(|w| w.write_status(&processing).unwrap());

        assert!(output.starts_with("payment_order_id,status,status_reason,updated_at\n"));
        assert!(output.contains("PO-2025110312000000001,PROCESSING,Picked up,2025-11-03T13:00:00"));
    }
}
