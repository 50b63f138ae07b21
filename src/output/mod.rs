mod report;

pub use report::{write_report, OutputFormat};
