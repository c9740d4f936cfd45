pub mod error;

pub use error::{FluxError, Result};
