pub mod instruction_reader;
pub mod order_writer;
