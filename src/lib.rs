pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod normalize;
pub mod router;
pub mod state;
pub mod upstream;
