pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod dispatcher;
pub mod forms;
pub mod logger;
pub mod prompt;
pub mod resolver;
pub mod storage;
pub mod types;
pub mod utilities;
pub mod view;

#[cfg(test)]
mod testing;
