pub mod cli;
pub mod completed;
pub mod export;
