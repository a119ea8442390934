//! Telegram update handlers

mod commands;
pub mod schema;
pub mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
