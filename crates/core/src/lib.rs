pub mod api;
pub mod commands;
pub mod error;
pub mod state;

pub use api::*;
pub use commands::command_line;
pub use error::{FieldError, ValidationError};
pub use state::AcState;
