pub mod callbacks;
pub mod commands;
pub mod interaction;
pub mod messages;
pub mod utils;

pub use callbacks::callback_handler;
pub use commands::command_handler;
pub use messages::message_handler;
