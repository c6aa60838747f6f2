use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;

pub struct RevCommand;

impl Command for RevCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        match args {
            [text] => Ok(Flow::Continue(format!("{}\n", text.chars().rev().collect::<String>()))),
            _ => Err(ShellError::argument("rev", "expects exactly one argument")),
        }
    }
}
