pub mod global;
pub mod hook;
pub mod loader;
pub mod logging;

pub use global::GlobalConfig;
pub use hook::HookConfig;
pub use loader::ConfigLoader;
pub use logging::{LogFormat, LoggingConfig};
