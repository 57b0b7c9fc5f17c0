//! InMemory Repository 実装

pub mod game;
pub mod session;

pub use game::InMemoryGameStateRepository;
pub use session::InMemorySessionRepository;
