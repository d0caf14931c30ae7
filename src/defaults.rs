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

// -- Naming --
/// Timestamp suffix appended to the remote directory name in rotation mode.
/// Unique per run as long as two runs for the same name don't start within
/// the same second.
pub const TIME_FORMAT: &str = "%Y_%m_%dT%H_%M_%S";

// -- Archive --
pub const ARCHIVE_SUFFIX: &str = "tar.zst";
pub const ZSTD_COMPRESSION_LEVEL: i32 = 3;

// -- Remote listing --
/// Entries requested per page when listing the destination directory.
pub const LIST_PAGE_SIZE: u64 = 200;
