// Use cases layer: the client's session workflow, rendering and input mapping.

pub mod input;
pub mod render;
pub mod session;
pub mod types;

pub use input::InputHandler;
pub use render::render;
pub use session::Session;
pub use types::{ClientEvent, Outbound};
