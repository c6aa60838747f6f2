// builds the tree once at startup - default skeleton or a JSON document
use crate::config::SessionConfig;
use crate::error::LoadError;
use crate::vfs::{VfsNode, VirtualFileSystem};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const ROOT_KEY: &str = "/";
const BIN_MARKER: &str = "executable";
const BIN_ENTRIES: [&str; 6] = ["cal", "cat", "cd", "ls", "pwd", "rev"];
const ETC_PASSWD: &str =
    "root:x:0:0:root:/root:/bin/bash\nuser:x:1000:1000:user:/home/user:/bin/bash";
const ETC_HOSTS: &str = "127.0.0.1 localhost\n::1 localhost";

/// One node of the on-disk document. Variant order matters: serde tries them
/// top to bottom, so an object with string `content` and `encoding` is a file
/// before it can be taken for a directory. Arrays are caught first since a
/// two-string array would otherwise satisfy `Encoded`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredNode {
    List(Vec<serde_json::Value>),
    Encoded { content: String, encoding: String },
    Directory(BTreeMap<String, StoredNode>),
    Text(String),
    Other(serde_json::Value),
}

/// Build the tree from `source`, or the default skeleton when there is none.
pub fn load(source: Option<&Path>, config: &SessionConfig) -> Result<VirtualFileSystem, LoadError> {
    match source {
        Some(path) => {
            log::info!("loading VFS from {}", path.display());
            let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            from_json(&json)
        }
        None => {
            log::info!("using default VFS skeleton for {}", config.username);
            Ok(default_skeleton(config))
        }
    }
}

/// Fixed layout, parameterized only by the user name.
pub fn default_skeleton(config: &SessionConfig) -> VirtualFileSystem {
    let bin = VfsNode::dir(BIN_ENTRIES.iter().map(|name| (*name, VfsNode::file(BIN_MARKER))));
    VirtualFileSystem::with_entries([
        ("home", VfsNode::dir([(config.username.as_str(), VfsNode::empty_dir())])),
        ("bin", bin),
        (
            "etc",
            VfsNode::dir([("passwd", VfsNode::file(ETC_PASSWD)), ("hosts", VfsNode::file(ETC_HOSTS))]),
        ),
        ("tmp", VfsNode::empty_dir()),
    ])
}

/// Decode a document. The root is either the value under a top-level `/`
/// key or, failing that, the top-level object itself.
pub fn from_json(json: &str) -> Result<VirtualFileSystem, LoadError> {
    let stored: StoredNode = serde_json::from_str(json)?;
    let mut top = match stored {
        StoredNode::Directory(map) => map,
        _ => return Err(LoadError::Malformed("top-level value must be an object".to_string())),
    };

    let root = match top.remove(ROOT_KEY) {
        Some(StoredNode::Directory(map)) => {
            if !top.is_empty() {
                log::warn!("ignoring {} entries next to the '/' root key", top.len());
            }
            map
        }
        Some(other) => {
            // not a directory under "/" - put it back so name validation reports it
            top.insert(ROOT_KEY.to_string(), other);
            top
        }
        None => top,
    };

    let children = convert_children(root, "")?;
    Ok(VirtualFileSystem::from_children(children))
}

fn convert_children(
    entries: BTreeMap<String, StoredNode>,
    parent: &str,
) -> Result<BTreeMap<String, VfsNode>, LoadError> {
    let mut children = BTreeMap::new();
    for (name, stored) in entries {
        let path = format!("{}/{}", parent, name);
        if name.is_empty() || name.contains('/') {
            return Err(LoadError::Malformed(format!("invalid entry name {:?} under '{}/'", name, parent)));
        }
        let node = convert_node(stored, &path)?;
        children.insert(name, node);
    }
    Ok(children)
}

fn convert_node(stored: StoredNode, path: &str) -> Result<VfsNode, LoadError> {
    Ok(match stored {
        StoredNode::Encoded { content, encoding } => VfsNode::file(decode_content(content, &encoding, path)?),
        StoredNode::Directory(map) => VfsNode::Directory { children: convert_children(map, path)? },
        StoredNode::Text(text) => VfsNode::file(text),
        StoredNode::List(items) => VfsNode::file(serde_json::Value::Array(items).to_string()),
        StoredNode::Other(value) => VfsNode::file(value.to_string()),
    })
}

fn decode_content(content: String, encoding: &str, path: &str) -> Result<String, LoadError> {
    if encoding != "base64" {
        return Ok(content);
    }
    // tolerate wrapped base64 - strip whitespace before decoding
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|source| LoadError::Base64 { path: path.to_string(), source })?;
    log::debug!("decoded {} ({} bytes)", path, bytes.len());
    String::from_utf8(bytes).map_err(|_| LoadError::Utf8 { path: path.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SessionConfig {
        SessionConfig::new("alice", "localhost")
    }

    #[test]
    fn test_default_skeleton_layout() {
        let vfs = default_skeleton(&cfg());
        assert_eq!(vfs.list_dir("/").unwrap(), vec!["bin", "etc", "home", "tmp"]);
        assert!(vfs.list_dir("/home/alice").unwrap().is_empty());
        assert_eq!(vfs.list_dir("/etc").unwrap(), vec!["hosts", "passwd"]);
        assert_eq!(vfs.list_dir("/bin").unwrap(), vec!["cal", "cat", "cd", "ls", "pwd", "rev"]);
        assert_eq!(vfs.read_file("/etc/hosts"), Some("127.0.0.1 localhost\n::1 localhost"));
        assert_eq!(vfs.read_file("/bin/ls"), Some("executable"));
    }

    #[test]
    fn test_default_skeleton_is_deterministic() {
        assert_eq!(default_skeleton(&cfg()), default_skeleton(&cfg()));
    }

    #[test]
    fn test_base64_file() {
        let vfs = from_json(r#"{"/": {"greet.txt": {"content": "aGVsbG8=", "encoding": "base64"}}}"#).unwrap();
        assert_eq!(vfs.read_file("/greet.txt"), Some("hello"));
    }

    #[test]
    fn test_plain_encoding_is_verbatim() {
        let vfs = from_json(r#"{"a.txt": {"content": "aGVsbG8=", "encoding": "utf-8"}}"#).unwrap();
        assert_eq!(vfs.read_file("/a.txt"), Some("aGVsbG8="));
    }

    #[test]
    fn test_top_level_without_root_key() {
        let vfs = from_json(r#"{"docs": {"readme": "hi"}, "empty": {}}"#).unwrap();
        assert_eq!(vfs.read_file("/docs/readme"), Some("hi"));
        assert!(vfs.resolve_path("/empty").unwrap().is_dir());
    }

    #[test]
    fn test_leaf_values_become_files() {
        let vfs = from_json(r#"{"n": 42, "flag": true, "nothing": null, "list": [1, 2]}"#).unwrap();
        assert_eq!(vfs.read_file("/n"), Some("42"));
        assert_eq!(vfs.read_file("/flag"), Some("true"));
        assert_eq!(vfs.read_file("/nothing"), Some("null"));
        assert_eq!(vfs.read_file("/list"), Some("[1,2]"));
    }

    #[test]
    fn test_string_pair_array_stays_literal() {
        let vfs = from_json(r#"{"pair": ["aGVsbG8=", "base64"]}"#).unwrap();
        assert_eq!(vfs.read_file("/pair"), Some(r#"["aGVsbG8=","base64"]"#));
    }

    #[test]
    fn test_content_without_encoding_is_a_directory() {
        let vfs = from_json(r#"{"d": {"content": "x"}}"#).unwrap();
        assert_eq!(vfs.list_dir("/d").unwrap(), vec!["content"]);
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        let err = from_json(r#"{"bad": {"content": "!!!not base64", "encoding": "base64"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Base64 { ref path, .. } if path == "/bad"));
    }

    #[test]
    fn test_non_utf8_payload_is_an_error() {
        // 0xff 0xfe
        let err = from_json(r#"{"bin": {"content": "//4=", "encoding": "base64"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Utf8 { .. }));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(from_json("[1, 2]"), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json(r#"{"a/b": "x"}"#), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json(r#"{"": "x"}"#), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json("{not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Some(Path::new("/definitely/not/here.json")), &cfg()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
