pub mod message;
pub mod telemetry;

pub use message::{Message, MessageBody, OutputMessage};
pub use telemetry::{take_present, BatchMode, DataPoint, InputMessage};
