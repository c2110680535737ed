//! # ddbot
//!
//! Telegram bot that rolls D&D 5e checks for characters fetched from DnD Beyond.
//!
//! - [`config`]: env-driven configuration sections
//! - [`handlers`]: one handler per command family plus logging and sender filtering
//! - [`telegram`]: teloxide adapters, profile sync and the update dispatcher
//! - [`health`]: liveness and readiness endpoints
//! - [`application`]: builds everything and drives it through the lifecycle manager

pub mod application;
pub mod cli;
pub mod commands;
pub mod config;
pub mod handlers;
pub mod health;
pub mod messages;
pub mod telegram;

pub use application::{
    build_character_cache, build_handler_chain, AppError, Application, HandlerDeps,
};
pub use cli::{Cli, Commands};
pub use config::BotConfig;
