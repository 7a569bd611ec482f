pub mod config;
pub mod link;

pub use config::ControllerConfig;
pub use link::{Ack, ControllerLink, TransportError};
