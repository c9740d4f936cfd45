pub mod factory;
pub mod hook;
pub mod passthrough;
pub mod regroup;
pub mod types;

pub use factory::HookFactory;
pub use hook::ProtocolHook;
pub use passthrough::PassthroughHook;
pub use regroup::{regroup, regroup_message, regroup_with, RegroupHook, RegroupOptions};
pub use types::HookType;
