pub mod auth;
pub mod exoplanet;
pub mod favorite;
pub mod refresh;
pub mod token;
pub mod user;
