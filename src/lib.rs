pub mod api;
pub mod args;
pub mod cli;
pub mod config;
pub mod engine;
pub mod export;
pub mod fetch;
pub mod model;
pub mod session;
pub mod terminal;
pub mod views;
