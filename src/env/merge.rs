//! Environment merging
//!
//! Builds one `MergedEnvironment` out of parsed override files plus an
//! overlay (normally the process environment). Precedence: deeper file
//! beats shallower file per key, overlay beats every file.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use super::{discover_env_files, parse_env_file, EnvFile};

/// String map with last-writer-wins values and first-appearance key order.
#[derive(Debug, Default, Clone)]
pub struct MergedEnvironment {
    order: Vec<String>,
    values: HashMap<String, String>,
}

impl MergedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair. A repeated key keeps its original position but takes
    /// the new value.
    pub fn insert(&mut self, key: String, value: String) {
        if !self.values.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(|key| (key.as_str(), self.values[key].as_str()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Overlay pairs with highest precedence, overwriting unconditionally.
    pub fn overlay(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            self.insert(key, value);
        }
    }

    /// Overlay raw OS pairs. An entry whose key or value is not valid
    /// UTF-8 cannot become a string mapping; it is skipped with a debug
    /// log rather than failing the resolution pass.
    pub fn overlay_os(&mut self, vars: impl IntoIterator<Item = (OsString, OsString)>) {
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => self.insert(key, value),
                (key, _) => {
                    let shown = match &key {
                        Ok(name) => name.clone(),
                        Err(raw) => raw.to_string_lossy().into_owned(),
                    };
                    tracing::debug!("skipping non-UTF-8 environment entry {shown:?}");
                }
            }
        }
    }
}

impl Serialize for MergedEnvironment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Merge parsed files in the given order; a later file's value wins.
pub fn merge_env_files<'a>(files: impl IntoIterator<Item = &'a EnvFile>) -> MergedEnvironment {
    let mut merged = MergedEnvironment::new();
    for file in files {
        tracing::debug!("merging {} ({} entries)", file.path.display(), file.entries.len());
        for (key, value) in &file.entries {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Full resolution pass for `start`: discover, merge shallowest-first, then
/// overlay the process environment.
pub fn resolve(start: &Path) -> MergedEnvironment {
    let files: Vec<EnvFile> =
        discover_env_files(start).iter().filter_map(|path| parse_env_file(path)).collect();
    let mut merged = merge_env_files(&files);
    merged.overlay_os(std::env::vars_os());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn env_file(name: &str, pairs: &[(&str, &str)]) -> EnvFile {
        EnvFile {
            path: PathBuf::from(name),
            entries: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn test_deeper_file_wins() {
        let shallow = env_file("root/.env", &[("A", "1"), ("B", "2")]);
        let deep = env_file("root/svc/.env", &[("B", "3")]);

        let merged = merge_env_files([&shallow, &deep]);
        assert_eq!(merged.get("A"), Some("1"));
        assert_eq!(merged.get("B"), Some("3"));
    }

    #[test]
    fn test_key_order_is_first_appearance() {
        let first = env_file("a.env", &[("X", "1"), ("Y", "2")]);
        let second = env_file("b.env", &[("Y", "9"), ("Z", "3")]);

        let merged = merge_env_files([&first, &second]);
        let keys: Vec<_> = merged.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["X", "Y", "Z"]);
        assert_eq!(merged.get("Y"), Some("9"));
    }

    #[test]
    fn test_overlay_overrides_everything() {
        let file = env_file(".env", &[("A", "file"), ("B", "file")]);
        let mut merged = merge_env_files([&file]);
        merged.overlay([("A".to_string(), "os".to_string())]);

        assert_eq!(merged.get("A"), Some("os"));
        assert_eq!(merged.get("B"), Some("file"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let file = env_file(".env", &[("A", "1"), ("B", "2"), ("A", "3")]);
        let once = merge_env_files([&file]);
        let twice = merge_env_files([&file, &file]);

        let a: Vec<_> = once.iter().collect();
        let b: Vec<_> = twice.iter().collect();
        assert_eq!(a, b);
        assert_eq!(once.get("A"), Some("3"));
    }

    // The end-to-end scenario: {root}/.env has A=1,B=2; {root}/svc/.env has
    // B=3; the overlay carries A=9. Resolving from svc yields A=9, B=3.
    #[test]
    fn test_resolution_scenario() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("marker");
        fs::write(tmp.path().join(".env"), "A=1\nB=2\n").expect("root env");
        let svc = tmp.path().join("svc");
        fs::create_dir(&svc).expect("svc");
        fs::write(svc.join(".env"), "B=3\n").expect("svc env");

        let files: Vec<EnvFile> =
            discover_env_files(&svc).iter().filter_map(|p| parse_env_file(p)).collect();
        let mut merged = merge_env_files(&files);
        merged.overlay([("A".to_string(), "9".to_string())]);

        assert_eq!(merged.get("A"), Some("9"));
        assert_eq!(merged.get("B"), Some("3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_overlay_os_skips_non_utf8_entries() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![0x66, 0xff, 0x66]);
        let mut merged = MergedEnvironment::new();
        merged.insert("GOOD".into(), "file".into());
        merged.overlay_os([
            (OsString::from("GOOD"), OsString::from("os")),
            (bad.clone(), OsString::from("ignored")),
            (OsString::from("BAD_VALUE"), bad),
        ]);

        assert_eq!(merged.get("GOOD"), Some("os"));
        assert!(merged.get("BAD_VALUE").is_none());
        assert_eq!(merged.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_survives_non_utf8_process_env() {
        use std::os::unix::ffi::OsStringExt;

        let name = OsString::from_vec(b"ENVFOLD_NON_UTF8_\xff".to_vec());
        std::env::set_var(&name, OsString::from_vec(vec![0x66, 0xff, 0x66]));

        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("marker");
        fs::write(tmp.path().join(".env"), "RESOLVE_SURVIVES=yes\n").expect("env");

        let merged = resolve(tmp.path());
        std::env::remove_var(&name);

        assert_eq!(merged.get("RESOLVE_SURVIVES"), Some("yes"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut merged = MergedEnvironment::new();
        merged.insert("B".into(), "2".into());
        merged.insert("A".into(), "1".into());

        let json = serde_json::to_string(&merged).expect("json");
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }
}
