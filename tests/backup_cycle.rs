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

use anyhow::{Result, bail};
use chrono::{TimeZone, Utc};
use tempfile::{TempDir, tempdir};

use yadup::backup;
use yadup::remote::memory::MemoryRemote;
use yadup::remote::{RemoteEntry, RemoteStorage};
use yadup::ui::RunLog;

const DEST: &str = "disk:/backups";

fn quiet_log() -> RunLog {
    RunLog::new(true, None)
}

/// Creates a local 'mydata' directory with one file inside a scratch dir.
fn make_source() -> Result<(TempDir, PathBuf)> {
    let parent = tempdir()?;
    let source = parent.path().join("mydata");
    std::fs::create_dir(&source)?;
    std::fs::write(source.join("notes.txt"), b"hello")?;
    Ok((parent, source))
}

fn seed_backups(remote: &MemoryRemote, names_and_times: &[(&str, i64)]) {
    for (name, secs) in names_and_times {
        remote.seed_dir(
            &format!("{DEST}/{name}"),
            Utc.timestamp_opt(*secs, 0).unwrap(),
        );
    }
}

#[test]
fn test_rotation_deletes_oldest_and_uploads() -> Result<()> {
    let (_guard, source) = make_source()?;
    let temp = tempdir()?;

    let remote = MemoryRemote::new();
    remote.create_dir(DEST)?;
    seed_backups(
        &remote,
        &[
            ("mydata_2024_01_01T00_00_00", 1_000),
            ("mydata_2024_01_02T00_00_00", 2_000),
            ("mydata_2024_01_03T00_00_00", 3_000),
        ],
    );

    backup::run(&remote, &quiet_log(), &source, DEST, Some(2), temp.path())?;

    let dirs = remote.dir_names(DEST);
    assert_eq!(dirs.len(), 2, "retained plus new must equal the count");
    assert!(dirs.contains(&"mydata_2024_01_03T00_00_00".to_string()));

    let new_dir = dirs
        .iter()
        .find(|d| *d != "mydata_2024_01_03T00_00_00")
        .unwrap();
    assert!(new_dir.starts_with("mydata_"));
    assert!(
        remote
            .file_bytes(&format!("{DEST}/{new_dir}/mydata.tar.zst"))
            .is_some()
    );

    // Cleanup invariant
    assert_eq!(std::fs::read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_overwrite_mode_replaces_single_directory() -> Result<()> {
    let (_guard, source) = make_source()?;
    let temp = tempdir()?;

    let remote = MemoryRemote::new();
    remote.create_dir(DEST)?;
    remote.seed_dir(
        &format!("{DEST}/mydata"),
        Utc.timestamp_opt(1_000, 0).unwrap(),
    );
    remote.seed_dir(
        &format!("{DEST}/mydata/stale"),
        Utc.timestamp_opt(1_000, 0).unwrap(),
    );

    backup::run(&remote, &quiet_log(), &source, DEST, None, temp.path())?;

    assert_eq!(remote.dir_names(DEST), ["mydata"]);
    assert!(!remote.exists(&format!("{DEST}/mydata/stale"))?);
    assert!(
        remote
            .file_bytes(&format!("{DEST}/mydata/mydata.tar.zst"))
            .is_some()
    );
    assert_eq!(std::fs::read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_creates_missing_destination_root() -> Result<()> {
    let (_guard, source) = make_source()?;
    let temp = tempdir()?;
    let remote = MemoryRemote::new();

    backup::run(&remote, &quiet_log(), &source, DEST, None, temp.path())?;

    assert!(remote.exists(DEST)?);
    assert_eq!(remote.dir_names(DEST), ["mydata"]);
    Ok(())
}

#[test]
fn test_unrelated_backups_are_never_rotated() -> Result<()> {
    let (_guard, source) = make_source()?;
    let temp = tempdir()?;

    let remote = MemoryRemote::new();
    remote.create_dir(DEST)?;
    seed_backups(
        &remote,
        &[
            ("mydata_2024_01_01T00_00_00", 1_000),
            ("otherdata_2023_01_01T00_00_00", 10),
            ("mydata2_2023_06_01T00_00_00", 20),
        ],
    );

    backup::run(&remote, &quiet_log(), &source, DEST, Some(1), temp.path())?;

    let dirs = remote.dir_names(DEST);
    assert!(dirs.contains(&"otherdata_2023_01_01T00_00_00".to_string()));
    assert!(dirs.contains(&"mydata2_2023_06_01T00_00_00".to_string()));
    assert!(!dirs.contains(&"mydata_2024_01_01T00_00_00".to_string()));
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum FailOp {
    ListDir,
    RemoveAll,
    CreateDir,
    Upload,
}

/// Wraps [`MemoryRemote`] and fails a single chosen operation, leaving the
/// rest intact.
struct FailingRemote {
    inner: MemoryRemote,
    fail: FailOp,
}

impl RemoteStorage for FailingRemote {
    fn exists(&self, path: &str) -> Result<bool> {
        self.inner.exists(path)
    }

    fn create_dir(&self, path: &str) -> Result<()> {
        if self.fail == FailOp::CreateDir {
            bail!("injected create_dir failure");
        }
        self.inner.create_dir(path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        if self.fail == FailOp::ListDir {
            bail!("injected list_dir failure");
        }
        self.inner.list_dir(path)
    }

    fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        if self.fail == FailOp::Upload {
            bail!("injected upload failure");
        }
        self.inner.upload(local, remote)
    }

    fn remove_all(&self, path: &str) -> Result<()> {
        if self.fail == FailOp::RemoveAll {
            bail!("injected remove_all failure");
        }
        self.inner.remove_all(path)
    }
}

#[test]
fn test_temp_archive_removed_after_remote_failures() -> Result<()> {
    for fail in [
        FailOp::ListDir,
        FailOp::RemoveAll,
        FailOp::CreateDir,
        FailOp::Upload,
    ] {
        let (_guard, source) = make_source()?;
        let temp = tempdir()?;

        let inner = MemoryRemote::new();
        inner.create_dir(DEST)?;
        seed_backups(
            &inner,
            &[
                ("mydata_2024_01_01T00_00_00", 1_000),
                ("mydata_2024_01_02T00_00_00", 2_000),
            ],
        );
        let remote = FailingRemote { inner, fail };

        let result = backup::run(&remote, &quiet_log(), &source, DEST, Some(1), temp.path());

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_dir(temp.path())?.count(),
            0,
            "temp archive must not survive a failed run"
        );
    }
    Ok(())
}

#[test]
fn test_archive_failure_leaves_nothing_behind() -> Result<()> {
    let parent = tempdir()?;
    let missing_source = parent.path().join("gone");
    let temp = tempdir()?;
    let remote = MemoryRemote::new();

    let result = backup::run(
        &remote,
        &quiet_log(),
        &missing_source,
        DEST,
        Some(2),
        temp.path(),
    );

    assert!(result.is_err());
    assert_eq!(std::fs::read_dir(temp.path())?.count(), 0);
    // Failed before any remote interaction
    assert!(!remote.exists(DEST)?);
    Ok(())
}
