//! ecwiz - 互動式建立或更新 .editorconfig

pub mod loader;
pub mod prompt;
pub mod render;
pub mod settings;
pub mod utils;
pub mod wizard;

// 重新導出常用類型
pub use loader::{LoadError, ParseError};
pub use prompt::{Prompter, TerminalPrompter};
pub use settings::{Charset, EndOfLine, IndentStyle, SettingsRecord};
pub use wizard::{Outcome, Wizard};
