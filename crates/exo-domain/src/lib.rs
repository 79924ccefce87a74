//! Domain types shared across the Exo Explorer crates.
//!
//! This crate contains only pure types and functions with no framework
//! dependencies. Import in `usecase/` and `domain/` layers; never in
//! `infra/` or `handlers/`.

pub mod enrich;
pub mod exoplanet;
pub mod pagination;
