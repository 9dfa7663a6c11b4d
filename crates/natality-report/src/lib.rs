pub mod error;
pub mod writer;

pub use error::{ReportError, Result};
pub use writer::{
    BIRTHS_FILE, COMPARISON_FILE, INDICATORS_FILE, write_births, write_comparison,
    write_indicators,
};
