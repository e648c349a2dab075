// Domain layer: client-side game state, input and draw primitives.

pub mod input;
pub mod ports;
pub mod scene;
pub mod state;

pub use input::{Command, InputState, Key, KeyBinding, KeyTransition};
pub use ports::View;
pub use scene::{Color, DrawCommand, Scene, TextAlign, TextSize};
pub use state::{ConnectionStatus, Role, Snapshot};
