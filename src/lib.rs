// shell emulator over an in-memory filesystem
// nothing on the real disk is touched except the initial tree and a script
pub mod command;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod lexer;
pub mod session;
pub mod storage;
pub mod vfs;

pub use command::{run_command, Command, CommandRegistry, CommandResult, Flow};
pub use config::{SessionConfig, ShellOptions};
pub use context::TerminalContext;
pub use error::{LoadError, ResolveError, ShellError};
pub use session::{read_script, LineReader, ReadEvent, RustylineReader, ScriptOutcome, SessionEnd, Shell};
pub use vfs::{VfsNode, VirtualFileSystem};
