pub mod chat;
pub mod config;
pub mod designer;
pub mod error;
pub mod parse;
