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

pub mod memory;
pub mod yadisk;

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

/// One listed item under a remote directory.
///
/// A fresh snapshot taken from a listing call; nothing is persisted locally.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEntry {
    /// Full remote location, unique within the storage.
    pub path: String,
    /// Base name of the entry.
    pub name: String,
    /// Creation timestamp assigned by the remote service.
    pub created: DateTime<Utc>,
}

/// Abstraction of the remote storage the backups are uploaded to.
///
/// Every call blocks until the remote service answers or fails. Any failure
/// is terminal for the running backup cycle; no operation is retried.
pub trait RemoteStorage {
    /// Returns true if a remote path exists.
    fn exists(&self, path: &str) -> Result<bool>;

    /// Creates a new, empty directory at the given remote path.
    fn create_dir(&self, path: &str) -> Result<()>;

    /// Lists all entries directly under a remote directory.
    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>>;

    /// Uploads a local file to the given remote path.
    fn upload(&self, local: &Path, remote: &str) -> Result<()>;

    /// Permanently removes a remote path and everything below it.
    fn remove_all(&self, path: &str) -> Result<()>;
}
