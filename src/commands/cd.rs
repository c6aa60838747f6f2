use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;

pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let target_dir = match args {
            // cd with no args goes home, classic unix behavior
            [] => "~",
            [path] => path.as_str(),
            _ => return Err(ShellError::argument("cd", "too many arguments")),
        };
        ctx.change_directory(target_dir)
            .map_err(|e| ShellError::from_resolve("cd", target_dir, e))?;
        Ok(Flow::silent()) // normal cd is silent
    }
}
