#[allow(clippy::module_inception)]
pub mod error;
pub mod fetch;

pub use error::{CliError, ExportError};
pub use fetch::{AggregationError, FetchError};
