pub mod client;
pub mod error;
pub mod wire;

pub use client::TodoistClient;
pub use error::{TodoistHttpError, TodoistHttpErrorKind};
