//! Result rendering and export

pub mod formatter;

pub use formatter::{
    formatter_for, ConsoleFormatter, CsvFormatter, JsonFormatter, OutputFormatter,
};
