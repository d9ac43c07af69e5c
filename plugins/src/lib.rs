pub mod factory;
pub mod todoist;
