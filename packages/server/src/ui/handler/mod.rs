mod http;
mod websocket;

pub use http::{get_game, health_check, logout};
pub use websocket::websocket_handler;
