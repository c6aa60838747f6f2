use crate::commands::{cal::CalCommand, cat::CatCommand, cd::CdCommand, exit::ExitCommand, ls::LsCommand, pwd::PwdCommand, rev::RevCommand};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::lexer::tokenize;

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep going; the text is written to stdout exactly as is.
    Continue(String),
    Exit,
}

impl Flow {
    pub fn silent() -> Self {
        Flow::Continue(String::new())
    }
}

pub type CommandResult = Result<Flow, ShellError>;

pub trait Command: Sync {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult;
}

// the closed set of builtins - adding one means adding a line here
static BUILTINS: &[(&str, &dyn Command)] = &[
    ("cal", &CalCommand),
    ("cat", &CatCommand),
    ("cd", &CdCommand),
    ("exit", &ExitCommand),
    ("ls", &LsCommand),
    ("pwd", &PwdCommand),
    ("rev", &RevCommand),
];

#[derive(Clone, Copy)]
pub struct CommandRegistry {
    commands: &'static [(&'static str, &'static dyn Command)],
}

impl CommandRegistry {
    pub fn default_commands() -> Self {
        Self { commands: BUILTINS }
    }

    pub fn get(&self, name: &str) -> Option<&'static dyn Command> {
        self.commands.iter().find(|(n, _)| *n == name).map(|(_, cmd)| *cmd)
    }

    pub fn get_command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names
    }

    /// Run an already tokenized line. No words is a no-op.
    pub fn dispatch(&self, words: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let (cmd, args) = match words.split_first() {
            Some(split) => split,
            None => return Ok(Flow::silent()),
        };
        let command = self
            .get(cmd)
            .ok_or_else(|| ShellError::UnknownCommand(cmd.clone()))?;
        log::debug!("dispatch {} {:?}", cmd, args);
        command.execute(args, ctx)
    }
}

/// Tokenize and dispatch one line of input.
pub fn run_command(input: &str, ctx: &mut TerminalContext, registry: &CommandRegistry) -> CommandResult {
    let words = tokenize(input.trim())?;
    registry.dispatch(&words, ctx)
}
