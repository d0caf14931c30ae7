// yadup backs up local directories to Yandex.Disk
// Copyright (C) 2025  yadup contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{RemoteEntry, RemoteStorage};

/// In-memory [`RemoteStorage`] with the same surface semantics as the real
/// service: creating an existing directory fails, removing an unknown path
/// fails, listing returns creation timestamps.
///
/// Backs the test suite; no network involved.
#[derive(Default)]
pub struct MemoryRemote {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    dirs: BTreeMap<String, DateTime<Utc>>,
    files: BTreeMap<String, (Vec<u8>, DateTime<Utc>)>,
}

fn base_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn parent(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a directory with a fixed creation timestamp.
    pub fn seed_dir(&self, path: &str, created: DateTime<Utc>) {
        self.state.lock().dirs.insert(path.to_string(), created);
    }

    /// Names of the directories directly under `path`, in listing order.
    pub fn dir_names(&self, path: &str) -> Vec<String> {
        let state = self.state.lock();
        state
            .dirs
            .keys()
            .filter(|dir| parent(dir) == Some(path))
            .map(|dir| base_name(dir))
            .collect()
    }

    /// Contents of an uploaded file, if present.
    pub fn file_bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().files.get(path).map(|(bytes, _)| bytes.clone())
    }
}

impl RemoteStorage for MemoryRemote {
    fn exists(&self, path: &str) -> Result<bool> {
        let state = self.state.lock();
        Ok(state.dirs.contains_key(path) || state.files.contains_key(path))
    }

    fn create_dir(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.dirs.contains_key(path) {
            bail!("Directory '{path}' already exists");
        }
        state.dirs.insert(path.to_string(), Utc::now());
        Ok(())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let state = self.state.lock();
        if !state.dirs.contains_key(path) {
            bail!("Directory '{path}' does not exist");
        }

        let dirs = state
            .dirs
            .iter()
            .map(|(p, created)| (p, *created))
            .chain(state.files.iter().map(|(p, (_, created))| (p, *created)));

        Ok(dirs
            .filter(|(entry_path, _)| parent(entry_path) == Some(path))
            .map(|(entry_path, created)| RemoteEntry {
                path: entry_path.clone(),
                name: base_name(entry_path),
                created,
            })
            .collect())
    }

    fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        let bytes = std::fs::read(local)
            .with_context(|| format!("Could not read '{}'", local.to_string_lossy()))?;

        let mut state = self.state.lock();
        match parent(remote) {
            Some(dir) if state.dirs.contains_key(dir) => {
                state.files.insert(remote.to_string(), (bytes, Utc::now()));
                Ok(())
            }
            _ => bail!("Upload target directory for '{remote}' does not exist"),
        }
    }

    fn remove_all(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock();
        let nested_prefix = format!("{path}/");

        let known = state.dirs.contains_key(path) || state.files.contains_key(path);
        if !known {
            bail!("'{path}' does not exist");
        }

        state
            .dirs
            .retain(|p, _| p != path && !p.starts_with(&nested_prefix));
        state
            .files
            .retain(|p, _| p != path && !p.starts_with(&nested_prefix));
        Ok(())
    }
}
