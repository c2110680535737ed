//! # ddbot-core
//!
//! Core types and traits for the character bot: [`Bot`], [`Handler`], message and user types,
//! command parsing, and tracing initialization. Transport-agnostic; the teloxide adapter lives in `ddbot`.

pub mod bot;
pub mod command;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use command::{BotCommand, ParsedCommand};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
