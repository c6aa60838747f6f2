//! Drivers for the dispatcher: a startup script and the interactive prompt.

use crate::command::{run_command, CommandRegistry, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::io::Write;
use std::path::Path;

/// One result of waiting for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    Line(String),
    Interrupted,
    Eof,
}

/// Where interactive lines come from. Production uses rustyline; tests feed
/// canned events.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError>;

    fn add_history(&mut self, _line: &str) {}
}

pub struct RustylineReader {
    editor: DefaultEditor,
}

impl RustylineReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadEvent::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::warn!("failed to add history entry: {}", e);
        }
    }
}

/// How a startup script ended when nothing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// Ran off the end of the file.
    Completed,
    /// Hit `exit`.
    Exited,
}

/// How a whole session ended, for the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Success,
    Failure,
}

/// Read the whole script up front. A missing, unreadable or non UTF-8 file
/// fails here, before any line runs.
pub fn read_script(path: &Path) -> Result<String, ShellError> {
    fs::read_to_string(path).map_err(|source| ShellError::ScriptFileMissing { path: path.to_path_buf(), source })
}

pub struct Shell {
    pub ctx: TerminalContext,
    registry: CommandRegistry,
}

impl Shell {
    pub fn new(ctx: TerminalContext) -> Self {
        Self { ctx, registry: CommandRegistry::default_commands() }
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        run_command(line, &mut self.ctx, &self.registry)
    }

    /// Echo and run each script line. The first failure is reported with its
    /// line number and stops everything.
    pub fn run_script<W: Write>(
        &mut self,
        source_name: &str,
        contents: &str,
        out: &mut W,
    ) -> Result<ScriptOutcome, ShellError> {
        log::info!("running script {}", source_name);
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            // skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            writeln!(out, "{}{}", self.ctx.prompt(), line)?;

            match self.execute_line(line) {
                Ok(Flow::Continue(text)) => out.write_all(text.as_bytes())?,
                Ok(Flow::Exit) => {
                    out.flush()?;
                    return Ok(ScriptOutcome::Exited);
                }
                Err(cause) => {
                    writeln!(out, "{}", cause)?;
                    let err = ShellError::Script {
                        source_name: source_name.to_string(),
                        line_no: idx + 1,
                        line: line.to_string(),
                        cause: Box::new(cause),
                    };
                    writeln!(out, "{}", err)?;
                    out.flush()?;
                    return Err(err);
                }
            }
        }
        out.flush()?;
        Ok(ScriptOutcome::Completed)
    }

    /// Prompt until `exit` or end of input. Errors are printed and the loop
    /// carries on.
    pub fn run_interactive<R: LineReader, W: Write>(&mut self, reader: &mut R, out: &mut W) -> Result<(), ShellError> {
        loop {
            let line = match reader.read_line(&self.ctx.prompt())? {
                ReadEvent::Line(line) => line,
                ReadEvent::Interrupted => {
                    writeln!(out)?;
                    continue;
                }
                ReadEvent::Eof => {
                    writeln!(out)?;
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            reader.add_history(line);

            match self.execute_line(line) {
                Ok(Flow::Continue(text)) => out.write_all(text.as_bytes())?,
                Ok(Flow::Exit) => break,
                Err(e) => writeln!(out, "{}", e)?,
            }
            out.flush()?;
        }
        out.flush()?;
        Ok(())
    }

    /// Startup lines: where the tree came from, the script, what can be typed.
    pub fn banner(&self, vfs_source: Option<&Path>, script: Option<&Path>) -> String {
        let vfs = vfs_source.map_or_else(|| "default skeleton".to_string(), |p| p.display().to_string());
        let script = script.map_or_else(|| "none".to_string(), |p| p.display().to_string());
        format!(
            "VFS: {}\nScript: {}\nCommands: {}\nType 'exit' to quit.\n\n",
            vfs,
            script,
            self.registry.get_command_names().join(", ")
        )
    }

    /// Run the startup script if there is one, then the prompt unless the
    /// script exited or the options say to stop. The reader is only opened
    /// when the prompt is actually needed.
    pub fn run_session<R, F, W>(
        &mut self,
        script: Option<(&str, &str)>,
        open_reader: F,
        out: &mut W,
    ) -> Result<SessionEnd, ShellError>
    where
        R: LineReader,
        F: FnOnce() -> Result<R, ShellError>,
        W: Write,
    {
        if let Some((name, contents)) = script {
            match self.run_script(name, contents, out) {
                Ok(ScriptOutcome::Exited) => return Ok(SessionEnd::Success),
                Ok(ScriptOutcome::Completed) if !self.ctx.options.interactive_after_script => {
                    log::info!("script {} finished, not entering interactive mode", name);
                    return Ok(SessionEnd::Success);
                }
                Ok(ScriptOutcome::Completed) => {}
                // already written out with its line number
                Err(ShellError::Script { .. }) => return Ok(SessionEnd::Failure),
                Err(e) => return Err(e),
            }
        }

        let mut reader = open_reader()?;
        self.run_interactive(&mut reader, out)?;
        Ok(SessionEnd::Success)
    }
}
