pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod server;
