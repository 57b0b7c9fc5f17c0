//! IdentityResolver の実装
//!
//! - `jwt`: HS256 で署名された JWT（cookie `token`）

pub mod jwt;

pub use jwt::{Claims, JwtIdentityResolver};
