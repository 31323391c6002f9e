mod bit;
pub use bit::*;

pub mod floating_text;
pub mod pointer;
pub mod storage;
pub mod viewport;

mod host_communication;
pub use host_communication::*;

#[cfg(not(target_arch = "wasm32"))]
mod host_simulation;
#[cfg(not(target_arch = "wasm32"))]
pub use host_simulation::*;
