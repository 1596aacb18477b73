//! Navi Host Library
//!
//! Hosts the retrieval core inside another process: opens the snapshot
//! chunk store once, then answers questions over a line-delimited JSON-RPC
//! boundary or from the command line.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod rpc;
pub mod seed;
pub mod store;

pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use knowledge::{InitSummary, KnowledgeBase};
pub use rpc::RpcServer;
pub use store::{Snapshot, SnapshotStore};
