pub mod page;
pub mod r#trait;

pub use page::ArchivePage;
pub use r#trait::{ArchiveSource, ProjectSource};
