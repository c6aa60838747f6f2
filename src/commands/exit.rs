use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;

pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        if !args.is_empty() {
            return Err(ShellError::argument("exit", format!("unsupported arguments: {}", args.join(" "))));
        }
        Ok(Flow::Exit)
    }
}
