//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, ChatConfig, ImagesConfig, LogFormat, LoggingConfig, ServerConfig,
};
