mod linter;

pub use linter::{Buffer, LintReport, Linter};
