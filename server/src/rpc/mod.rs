//! JSON-RPC host boundary
//!
//! Line-delimited JSON-RPC 2.0 over stdio. A host process calls
//! `initialize` once with the store configuration, then `rag` per question,
//! and `shutdown` to release the store.
//!
//! ## Usage
//!
//! ```bash
//! navi-host serve --db data/xda.json
//! ```

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::*;
pub use server::RpcServer;
pub use transport::LineTransport;
