use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::vfs::VfsNode;

pub struct CatCommand;

impl Command for CatCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let path = match args {
            [path] => path,
            [] => return Err(ShellError::argument("cat", "missing file operand")),
            _ => return Err(ShellError::argument("cat", "expects exactly one file")),
        };

        match ctx.resolve(path).map_err(|e| ShellError::from_resolve("cat", path, e))? {
            VfsNode::File { content } => Ok(Flow::Continue(format!("{}\n", content))),
            VfsNode::Directory { .. } => Err(ShellError::IsADirectory { command: "cat", path: path.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{args, ctx};

    #[test]
    fn test_cat_single_file() {
        let mut ctx = ctx();
        let out = CatCommand.execute(&args(&["/etc/hosts"]), &mut ctx).unwrap();
        assert_eq!(out, Flow::Continue("127.0.0.1 localhost\n::1 localhost\n".to_string()));
    }

    #[test]
    fn test_cat_relative_path() {
        let mut ctx = ctx();
        ctx.change_directory("/bin").unwrap();
        let out = CatCommand.execute(&args(&["ls"]), &mut ctx).unwrap();
        assert_eq!(out, Flow::Continue("executable\n".to_string()));
    }

    #[test]
    fn test_cat_directory() {
        let mut ctx = ctx();
        let err = CatCommand.execute(&args(&["/etc"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "cat: /etc: Is a directory");
    }

    #[test]
    fn test_cat_nonexistent_file() {
        let mut ctx = ctx();
        let err = CatCommand.execute(&args(&["nonexistent.txt"]), &mut ctx).unwrap_err();
        assert!(matches!(err, ShellError::PathNotFound { command: "cat", .. }));
    }

    #[test]
    fn test_cat_arity() {
        let mut ctx = ctx();
        assert!(matches!(CatCommand.execute(&[], &mut ctx), Err(ShellError::Argument { .. })));
        let err = CatCommand.execute(&args(&["/etc/hosts", "/etc/passwd"]), &mut ctx).unwrap_err();
        assert!(matches!(err, ShellError::Argument { command: "cat", .. }));
    }
}
