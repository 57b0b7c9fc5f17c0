//! Entity 定義

pub mod game;
pub mod session;

pub use game::GameState;
pub use session::{Roster, SeatAssignment, SessionRegistry};
