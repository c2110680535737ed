//! DnD Beyond character-service client.

mod client;
mod sheet;

pub use client::{DdbClient, DDB_API_BASE};
