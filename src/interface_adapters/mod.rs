// Interface adapters: wire protocol, network connection and terminal I/O.

pub mod net;
pub mod protocol;
pub mod terminal;
pub mod utils;
