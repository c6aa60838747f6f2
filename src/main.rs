use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vshell::{read_script, storage, RustylineReader, SessionConfig, SessionEnd, Shell, ShellOptions, TerminalContext};

/// Shell emulator over an in-memory filesystem.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// JSON document describing the filesystem (empty or omitted: default skeleton)
    vfs_path: Option<OsString>,

    /// Script to run before the prompt
    script_path: Option<PathBuf>,

    /// Stop after the script instead of opening the prompt
    #[arg(long)]
    no_interactive: bool,
}

impl Cli {
    // "" lets a script run against the default skeleton
    fn vfs_path(&self) -> Option<&Path> {
        self.vfs_path.as_deref().filter(|p| !p.is_empty()).map(Path::new)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // clap exits with a usage error on extra positionals
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = SessionConfig::from_env();
    let options = ShellOptions { interactive_after_script: !cli.no_interactive };

    let vfs_path = cli.vfs_path();
    log::info!("vfs source: {:?}, script: {:?}", vfs_path, cli.script_path);
    let vfs = storage::load(vfs_path, &config).context("cannot start session")?;
    let script = match cli.script_path.as_deref() {
        Some(path) => Some((path.display().to_string(), read_script(path)?)),
        None => None,
    };

    let mut shell = Shell::new(TerminalContext::new(vfs, config, options));
    print!("{}", shell.banner(vfs_path, cli.script_path.as_deref()));

    let mut out = io::stdout();
    let script = script.as_ref().map(|(name, contents)| (name.as_str(), contents.as_str()));
    match shell.run_session(script, RustylineReader::new, &mut out)? {
        SessionEnd::Success => Ok(ExitCode::SUCCESS),
        SessionEnd::Failure => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vfs_path_means_default() {
        let cli = Cli::try_parse_from(["vshell", "", "boot.sh"]).unwrap();
        assert_eq!(cli.vfs_path(), None);
        assert_eq!(cli.script_path.as_deref(), Some(Path::new("boot.sh")));

        let cli = Cli::try_parse_from(["vshell", "tree.json"]).unwrap();
        assert_eq!(cli.vfs_path(), Some(Path::new("tree.json")));
        assert!(!cli.no_interactive);
    }

    #[test]
    fn test_three_positionals_rejected() {
        let err = Cli::try_parse_from(["vshell", "a", "b", "c"]).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }
}
