use std::env;

const USER_VARS: [&str; 3] = ["USER", "USERNAME", "LOGNAME"];
const DEFAULT_USER: &str = "user";
const DEFAULT_HOST: &str = "localhost";

/// Who is logged in. Resolved once at startup and never re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub username: String,
    pub hostname: String,
    pub home: String,
}

impl SessionConfig {
    pub fn new(username: &str, hostname: &str) -> Self {
        Self {
            username: username.to_string(),
            hostname: hostname.to_string(),
            home: format!("/home/{}", username),
        }
    }

    /// USER, then USERNAME, then LOGNAME, then a fixed fallback.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut username = None;
        for key in USER_VARS {
            match lookup(key) {
                Some(value) if is_valid_name(&value) => {
                    username = Some(value);
                    break;
                }
                Some(value) if !value.is_empty() => {
                    log::warn!("ignoring {}={:?}: not usable as a home directory name", key, value);
                }
                _ => {}
            }
        }
        let username = username.unwrap_or_else(|| DEFAULT_USER.to_string());
        let hostname = lookup("HOSTNAME")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self::new(&username, &hostname)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/')
}

/// Behaviour switches for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    /// Drop into the prompt once a startup script ends without `exit`.
    pub interactive_after_script: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self { interactive_after_script: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_user_fallback_order() {
        let cfg = SessionConfig::from_lookup(lookup_from(&[("USERNAME", "bob"), ("LOGNAME", "carol")]));
        assert_eq!(cfg.username, "bob");
        assert_eq!(cfg.home, "/home/bob");

        let cfg = SessionConfig::from_lookup(lookup_from(&[("USER", "alice"), ("LOGNAME", "carol")]));
        assert_eq!(cfg.username, "alice");

        let cfg = SessionConfig::from_lookup(lookup_from(&[("LOGNAME", "carol")]));
        assert_eq!(cfg.username, "carol");
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let cfg = SessionConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg.username, "user");
        assert_eq!(cfg.hostname, "localhost");
        assert_eq!(cfg.home, "/home/user");
    }

    #[test]
    fn test_unusable_names_are_skipped() {
        let cfg = SessionConfig::from_lookup(lookup_from(&[("USER", ""), ("USERNAME", "a/b"), ("LOGNAME", "dave")]));
        assert_eq!(cfg.username, "dave");
    }

    #[test]
    fn test_hostname_from_env() {
        let cfg = SessionConfig::from_lookup(lookup_from(&[("HOSTNAME", "box")]));
        assert_eq!(cfg.hostname, "box");
    }
}
