use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_initiation::application::service::PaymentOrderService;
use payment_initiation::config::{Cli, Command};
use payment_initiation::domain::ports::{ClockRef, PaymentOrderStoreBox};
use payment_initiation::infrastructure::clock::SystemClock;
use payment_initiation::infrastructure::id_generator::SequentialIdGenerator;
use payment_initiation::infrastructure::in_memory::InMemoryPaymentOrderStore;
use payment_initiation::interfaces::csv::instruction_reader::InstructionReader;
use payment_initiation::interfaces::csv::order_writer::PaymentOrderWriter;
use payment_initiation::logging;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

fn open_store(db_path: Option<PathBuf>) -> Result<PaymentOrderStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            use payment_initiation::infrastructure::rocksdb::RocksDBStore;
            let store = RocksDBStore::open(db_path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryPaymentOrderStore::new()))
        }
        None => Ok(Box::new(InMemoryPaymentOrderStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let clock: ClockRef = Arc::new(SystemClock);
    let service = PaymentOrderService::new(
        open_store(cli.db_path)?,
        Box::new(SequentialIdGenerator::new(clock.clone())),
        clock,
    );

    let stdout = io::stdout();
    let mut writer = PaymentOrderWriter::new(stdout.lock());

    match cli.command {
        Command::Initiate { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = InstructionReader::new(file);
            for command in reader.commands() {
                match command {
                    Ok(command) => match service.initiate(command).await {
                        Ok(order) => writer.write_order(&order).into_diagnostic()?,
                        Err(e) => {
                            eprintln!("Error initiating payment order ({}): {}", e.category(), e)
                        }
                    },
                    Err(e) => {
                        eprintln!("Error reading payment instruction: {}", e);
                    }
                }
            }
        }
        Command::Get { payment_order_id } => {
            let order = service.retrieve(&payment_order_id).await.into_diagnostic()?;
            writer.write_order(&order).into_diagnostic()?;
        }
        Command::Status { payment_order_id } => {
            let order = service
                .retrieve_status(&payment_order_id)
                .await
                .into_diagnostic()?;
            writer.write_status(&order).into_diagnostic()?;
        }
        Command::Transition {
            payment_order_id,
            status,
            reason,
        } => {
            let order = service
                .update_status(&payment_order_id, status, reason)
                .await
                .into_diagnostic()?;
            writer.write_order(&order).into_diagnostic()?;
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
