//! Infrastructure layer - external service implementations

pub mod cache;
pub mod chat;
pub mod generator;
pub mod http_client;
pub mod logging;
