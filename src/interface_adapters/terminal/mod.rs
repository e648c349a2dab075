// Terminal adapter: key translation and the ratatui-backed view.

pub mod keys;
pub mod view;

pub use keys::{KeyTranslator, ReleaseMode, is_quit};
pub use view::TerminalView;
