pub mod agent;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod transcript;
pub mod ui;
