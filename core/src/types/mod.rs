mod completion;
mod scope;
mod task;

pub use completion::{CompletedTasks, CompletionInfo, CompletionScope};
pub use scope::FetchScope;
pub use task::{Due, Section, Task};
