pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod recipe;
pub mod state;
pub mod user;
