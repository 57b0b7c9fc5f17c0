//! Repository の実装
//!
//! - `inmemory`: プロセス内のメモリに保持する実装（単一ルーム・単一プロセス）

pub mod inmemory;

pub use inmemory::{InMemoryGameStateRepository, InMemorySessionRepository};
