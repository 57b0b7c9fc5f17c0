//! RulesEngine の実装
//!
//! - `standard`: shakmaty クレートによる標準チェス

pub mod standard;

pub use standard::ShakmatyRulesEngine;
