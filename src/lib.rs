pub mod agent;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod facts;
pub mod length;
pub mod memory;
pub mod models;
pub mod prompt;
pub mod repl;
pub mod secrets;
pub mod session;
pub mod stage;
pub mod theme;
pub mod types;
