//! LSP request/notification handlers.

mod command;
mod configuration;
mod cursor;
mod documents;
mod initialize;
mod inlay_hint;

pub use command::handle_execute_command;
pub use configuration::handle_did_change_configuration;
pub use cursor::handle_cursor_moved;
pub use documents::{handle_did_change, handle_did_close, handle_did_open};
pub use initialize::{handle_initialize, handle_initialized, handle_shutdown};
pub use inlay_hint::handle_inlay_hint;
