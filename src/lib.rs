pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod forecast;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;
