use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;
use std::fmt::Write as _;

/// ls [PATH]
/// List a directory one name per line, sorted. A file operand is echoed back.
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let entries = match args {
            [] => ctx.list_directory(),
            [path] => {
                // bail if path doesn't exist
                let node = ctx.resolve(path).map_err(|e| ShellError::from_resolve("ls", path, e))?;
                match node.children() {
                    Some(children) => children.keys().cloned().collect(),
                    // single file case - just list the thing itself
                    None => vec![path.clone()],
                }
            }
            _ => return Err(ShellError::argument("ls", format!("unsupported arguments: {}", args.join(" ")))),
        };

        let mut out = String::new();
        for name in &entries {
            let _ = writeln!(out, "{}", name);
        }
        Ok(Flow::Continue(out))
    }
}
