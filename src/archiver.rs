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

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::defaults::{ARCHIVE_SUFFIX, ZSTD_COMPRESSION_LEVEL};

/// Packs the contents of `source` into a zstd-compressed tarball inside
/// `temp_dir` and returns its path.
///
/// The archive is named `<basename>.tar.zst`. If archiving fails after the
/// output file was created, the partial file is removed before the error
/// propagates.
pub fn create_archive(source: &Path, temp_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .with_context(|| format!("'{}' has no base name", source.to_string_lossy()))?;
    let archive_path = temp_dir.join(format!("{}.{}", name.to_string_lossy(), ARCHIVE_SUFFIX));

    match write_archive(source, &archive_path) {
        Ok(()) => Ok(archive_path),
        Err(e) => {
            let _ = std::fs::remove_file(&archive_path);
            Err(e)
        }
    }
}

fn write_archive(source: &Path, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path).with_context(|| {
        format!(
            "Could not create archive file '{}'",
            archive_path.to_string_lossy()
        )
    })?;
    let encoder = zstd::Encoder::new(file, ZSTD_COMPRESSION_LEVEL)?;

    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(".", source)
        .with_context(|| format!("Could not archive '{}'", source.to_string_lossy()))?;

    let encoder = builder
        .into_inner()
        .with_context(|| "Could not finish tar archive")?;
    encoder
        .finish()
        .with_context(|| "Could not finish zstd stream")?;

    Ok(())
}
