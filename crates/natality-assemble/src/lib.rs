pub mod aggregate;
pub mod assemble;
pub mod corr;
pub mod error;

pub use aggregate::{aggregate_births, share_percent};
pub use assemble::assemble;
pub use corr::pearson;
pub use error::{AssembleError, Result};
