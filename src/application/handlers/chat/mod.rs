//! Chat handlers - process a message, execute the resulting action.

mod execute_action;
mod process_message;

pub use execute_action::ExecuteActionHandler;
pub use process_message::{ProcessMessageCommand, ProcessMessageHandler, ProcessMessageResult};
