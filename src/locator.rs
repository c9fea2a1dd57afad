use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static DRIVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Za-z]):").unwrap());

/// Resolves a user-supplied report path, which may be written in Windows syntax
/// (`C:\Users\...`), against the local filesystem.
pub struct Locator {
    mount_root: String,
    search_dir: PathBuf,
}

impl Locator {
    pub fn new(mount_root: impl Into<String>, search_dir: impl Into<PathBuf>) -> Self {
        Self {
            mount_root: mount_root.into(),
            search_dir: search_dir.into(),
        }
    }

    /// Ordered, de-duplicated candidate paths for `token`:
    ///
    /// 1. the token as given
    /// 2. drive prefix stripped, backslashes turned into slashes
    /// 3. (2) re-rooted under `<mount_root>/<drive>` (`c` when no drive is present)
    /// 4. the base file name of (2) inside the search directory
    pub fn candidates(&self, token: &str) -> Vec<PathBuf> {
        let (drive, rest) = match DRIVE_RE.captures(token) {
            Some(cap) => (cap[1].to_ascii_lowercase(), &token[cap[0].len()..]),
            None => ("c".to_string(), token),
        };
        let normalized = rest.replace('\\', "/");

        let mount = self.mount_root.trim_end_matches('/');
        let mounted = if normalized.starts_with('/') {
            format!("{mount}/{drive}{normalized}")
        } else {
            format!("{mount}/{drive}/{normalized}")
        };

        let mut out = vec![PathBuf::from(token), PathBuf::from(&normalized), PathBuf::from(mounted)];

        let base_name = normalized.rsplit('/').next().unwrap_or("");
        if !base_name.is_empty() {
            out.push(self.search_dir.join(base_name));
        }

        let mut seen = Vec::with_capacity(out.len());
        out.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(p.clone());
                true
            }
        });
        out
    }

    /// First candidate that exists on disk.
    pub fn locate(&self, token: &str) -> Option<PathBuf> {
        self.locate_with(token, |path| path.is_file())
    }

    /// Like [`Locator::locate`] with an injectable existence check. Probing stops
    /// at the first hit.
    pub fn locate_with<F>(&self, token: &str, mut exists: F) -> Option<PathBuf>
    where
        F: FnMut(&Path) -> bool,
    {
        self.candidates(token).into_iter().find(|candidate| {
            let hit = exists(candidate);
            debug!(candidate = %candidate.display(), hit, "probing report path");
            hit
        })
    }
}
