//! The editor-facing facade for the scriptls language-server core (§6):
//! wires together document ownership, the workspace symbol store, and
//! completion dispatch behind one typed Rust API. Wire encoding and
//! transport (JSON-RPC, an event loop, a binary entry point) are a
//! front-end's job — this crate is a library, not a server.

mod config;
mod facade;
mod symbol_info;

pub use config::CoreConfig;
pub use facade::ScriptlsCore;
pub use symbol_info::SymbolInfo;
