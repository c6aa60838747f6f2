use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;

/// pwd
/// Print the full path of the current working directory.
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        if !args.is_empty() {
            return Err(ShellError::argument("pwd", format!("unsupported arguments: {}", args.join(" "))));
        }
        Ok(Flow::Continue(format!("{}\n", ctx.cwd())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{args, ctx};

    #[test]
    fn test_pwd_prints_absolute_cursor() {
        let mut ctx = ctx();
        assert_eq!(PwdCommand.execute(&[], &mut ctx).unwrap(), Flow::Continue("/home/alice\n".to_string()));
        ctx.change_directory("/").unwrap();
        assert_eq!(PwdCommand.execute(&[], &mut ctx).unwrap(), Flow::Continue("/\n".to_string()));
    }

    #[test]
    fn test_pwd_rejects_arguments() {
        let mut ctx = ctx();
        let err = PwdCommand.execute(&args(&["-L"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "pwd: unsupported arguments: -L");
    }
}
