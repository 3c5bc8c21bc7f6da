//! Shared fixtures: a temp profile root with profiles and a local baseline file.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BASELINE: &str = "\
/******
 * hardened baseline
 ******/
user_pref(\"browser.startup.page\", 0);
defaultPref(\"privacy.resistFingerprinting\", true); // 4501
lockPref(\"network.prefetch-next\", false);
user_pref(\"_prefsync.marker\", \"skip me\");
";

/// Temporary workspace holding `profiles/` and `baseline.js`
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("profiles")).unwrap();
        std::fs::write(dir.path().join("baseline.js"), BASELINE).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("profiles")
    }

    pub fn baseline(&self) -> PathBuf {
        self.dir.path().join("baseline.js")
    }

    /// Create a profile directory, optionally with a preference file.
    pub fn add_profile(&self, name: &str, user_js: Option<&str>) -> PathBuf {
        let path = self.root().join(name);
        std::fs::create_dir_all(&path).unwrap();
        if let Some(content) = user_js {
            std::fs::write(path.join("user.js"), content).unwrap();
        }
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

pub fn backups_in(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|e| e == "bak").unwrap_or(false))
        .collect();
    found.sort();
    found
}
