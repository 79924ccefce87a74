//! Auth types shared across the Exo Explorer crates.
//!
//! Provides the JWT claim set, HS256 validation, and the `Identity`
//! bearer-token extractor used by protected routes.

pub mod identity;
pub mod token;
