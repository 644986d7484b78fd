mod connection_registry;
mod relay;
mod signaling_output;
mod ws_handler;

pub use connection_registry::*;
pub use relay::*;
pub use signaling_output::*;
pub use ws_handler::*;
