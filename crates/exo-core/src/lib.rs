//! Cross-cutting glue shared by the Exo Explorer service crates: health
//! handlers, request-id middleware, timestamp serialization, tracing setup,
//! and argon2 secret hashing.

pub mod health;
pub mod middleware;
pub mod password;
pub mod serde;
pub mod tracing;
