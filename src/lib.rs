pub mod config;
pub mod error;
pub mod sky;
pub mod render;
pub mod engine;

// Platform-independent input dispatch
pub mod input;

pub use config::SkyConfig;
pub use error::SkyError;
