mod ice_provider;
mod ice_resolver;

pub use ice_provider::*;
pub use ice_resolver::*;
