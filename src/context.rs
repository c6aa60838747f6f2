use crate::config::{SessionConfig, ShellOptions};
use crate::error::ResolveError;
use crate::vfs::{VfsNode, VirtualFileSystem};

/// Everything a command can see: the tree, the cursor and who is logged in.
pub struct TerminalContext {
    pub vfs: VirtualFileSystem,
    pub config: SessionConfig,
    pub options: ShellOptions,
    // always canonical and always a directory in `vfs`
    cwd: String,
}

impl TerminalContext {
    /// Start in the home directory when the tree has one, otherwise at `/`.
    pub fn new(vfs: VirtualFileSystem, config: SessionConfig, options: ShellOptions) -> Self {
        let cwd = match vfs.resolve_path(&config.home) {
            Ok(node) if node.is_dir() => config.home.clone(),
            _ => {
                log::info!("{} not present in VFS, starting at /", config.home);
                "/".to_string()
            }
        };
        Self { vfs, config, options, cwd }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn home(&self) -> &str {
        &self.config.home
    }

    /// Turn whatever the user typed into a canonical absolute path:
    /// tilde expansion, joining onto the cursor, then `.`/`..` folding.
    pub fn absolute_path(&self, path: &str) -> String {
        let expanded = if path == "~" {
            self.config.home.clone()
        } else if let Some(rest) = path.strip_prefix("~/") {
            format!("{}/{}", self.config.home, rest)
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            resolve_relative_path(&self.cwd, path)
        };
        normalize_path(&expanded)
    }

    pub fn resolve(&self, path: &str) -> Result<&VfsNode, ResolveError> {
        self.vfs.resolve_path(&self.absolute_path(path))
    }

    /// Move the cursor. It is only replaced once the target is known to be a
    /// directory, so a failed `cd` leaves it untouched.
    pub fn change_directory(&mut self, path: &str) -> Result<(), ResolveError> {
        let target = match path {
            "." => return Ok(()),
            ".." => get_parent_directory(&self.cwd),
            _ => {
                let target = self.absolute_path(path);
                match self.vfs.resolve_path(&target)? {
                    VfsNode::Directory { .. } => target,
                    VfsNode::File { .. } => return Err(ResolveError::NotADirectory),
                }
            }
        };
        log::debug!("cwd {} -> {}", self.cwd, target);
        self.cwd = target;
        Ok(())
    }

    /// Sorted names under the cursor. Empty if the cursor somehow stopped
    /// naming a directory.
    pub fn list_directory(&self) -> Vec<String> {
        self.vfs.list_dir(&self.cwd).unwrap_or_default()
    }

    /// The cursor with the home prefix shown as `~`.
    pub fn display_path(&self) -> String {
        let home = self.home();
        if self.cwd == home {
            "~".to_string()
        } else if let Some(rest) = self.cwd.strip_prefix(&format!("{}/", home)) {
            format!("~/{}", rest)
        } else {
            self.cwd.clone()
        }
    }

    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.config.username, self.config.hostname, self.display_path())
    }
}

// get parent directory path - handles edge cases like root
fn get_parent_directory(current_path: &str) -> String {
    match current_path.trim_end_matches('/').rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => current_path[..idx].to_string(),
    }
}

// resolve relative path against current directory
fn resolve_relative_path(current_path: &str, relative_path: &str) -> String {
    if relative_path.is_empty() {
        return current_path.to_string();
    }
    let base = current_path.trim_end_matches('/');
    format!("{}/{}", base, relative_path)
}

// fold . and .. and duplicate slashes; .. at root stays at root
fn normalize_path(path: &str) -> String {
    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                components.pop();
            }
            comp => components.push(comp),
        }
    }
    format!("/{}", components.join("/"))
}
