mod occupancy;
mod room_manager;

pub use occupancy::*;
pub use room_manager::*;
