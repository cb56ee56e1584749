//! Context-recognizing completion strategies over a parse position (§4.9).
//!
//! [`CompletionDispatcher`] owns an ordered list of [`Strategy`]
//! implementations; the first whose gate matches a [`CompletionContext`]
//! produces the result.

mod config;
mod context;
mod dispatcher;
mod item;
mod naming;
mod receiver;
mod strategies;
mod strategy;

pub use config::CompletionConfig;
pub use context::CompletionContext;
pub use dispatcher::CompletionDispatcher;
pub use item::{Command, CompletionItem, CompletionItemKind, CompletionResult, TextEdit};
pub use strategy::Strategy;
