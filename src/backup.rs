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

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::{archiver, remote::RemoteStorage, rotation, ui::RunLog, utils};

/// Local temporary archive, deleted when it goes out of scope.
///
/// The archive is the only local artifact of a run; tying its removal to the
/// scope guarantees cleanup on every exit path, error paths included. A
/// failed removal is reported as a warning and never fails the run.
struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    fn create(source: &Path, temp_dir: &Path) -> Result<Self> {
        let path = archiver::create_archive(source, temp_dir)?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            eprintln!(
                "Warning: could not remove temporary archive '{}': {}",
                self.path.to_string_lossy(),
                e
            );
        }
    }
}

/// Drives one end-to-end backup cycle.
///
/// Archives `source` into `temp_dir`, makes sure `dest` exists remotely,
/// rotates older sibling backups when `count` is set (or replaces the single
/// destination directory when it is not), and uploads the archive. Every
/// remote failure aborts the run; the temporary archive is removed
/// regardless of the outcome.
pub fn run(
    remote: &dyn RemoteStorage,
    log: &RunLog,
    source: &Path,
    dest: &str,
    count: Option<usize>,
    temp_dir: &Path,
) -> Result<()> {
    let name = source
        .file_name()
        .with_context(|| format!("'{}' has no base name", source.to_string_lossy()))?
        .to_string_lossy()
        .into_owned();

    let archive = TempArchive::create(source, temp_dir)?;

    if !remote.exists(dest)? {
        log.info(&format!("Create directory {dest}"));
        remote.create_dir(dest)?;
    }

    let plan = if count.is_some() {
        let entries = remote.list_dir(dest)?;
        rotation::plan(rotation::siblings(entries, &name), count, &name, Local::now())
    } else {
        rotation::plan(Vec::new(), None, &name, Local::now())
    };

    for entry in &plan.remove {
        log.info(&format!("Remove directory {}", entry.path));
        remote.remove_all(&entry.path)?;
    }

    let dest_dir = utils::remote_join(dest, &plan.dest_name);

    // Overwrite mode reuses a fixed directory name; replace it wholesale.
    if count.is_none() && remote.exists(&dest_dir)? {
        log.info(&format!("Remove directory {dest_dir}"));
        remote.remove_all(&dest_dir)?;
    }

    log.info(&format!("Create directory {dest_dir}"));
    remote.create_dir(&dest_dir)?;

    let archive_name = archive
        .path()
        .file_name()
        .with_context(|| "Archive has no file name")?
        .to_string_lossy()
        .into_owned();
    let dest_path = utils::remote_join(&dest_dir, &archive_name);
    remote.upload(archive.path(), &dest_path)?;
    log.info(&format!("Upload file {dest_path}"));

    Ok(())
}
