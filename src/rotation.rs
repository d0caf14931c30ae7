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

use chrono::{DateTime, Local};

use crate::{defaults::TIME_FORMAT, remote::RemoteEntry};

/// Outcome of the rotation policy for one backup cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPlan {
    /// Entries to delete before uploading, oldest first.
    pub remove: Vec<RemoteEntry>,
    /// Name of the remote directory the new backup goes into.
    pub dest_name: String,
}

/// Selects the entries that belong to the backup family `name`.
///
/// An entry is a sibling if its name is exactly `name` (overwrite mode
/// leftover) or `name` followed by an underscore-separated suffix (rotation
/// mode). Entries of unrelated backups sharing the destination directory are
/// never rotation candidates.
pub fn siblings(entries: Vec<RemoteEntry>, name: &str) -> Vec<RemoteEntry> {
    entries
        .into_iter()
        .filter(|entry| {
            entry.name == name
                || entry
                    .name
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with('_'))
        })
        .collect()
}

/// Decides which sibling backups to delete and where the new backup lands.
///
/// With `count` absent the single directory `name` is reused every run and
/// nothing is scheduled for deletion here; the orchestrator replaces the
/// directory instead. With `count = C`, the siblings are sorted by creation
/// time and enough of the oldest ones are removed that the retained entries
/// plus the new upload total exactly `C` whenever the limit was already
/// reached.
///
/// Entries with equal creation timestamps keep their input order (the sort
/// is stable).
pub fn plan(
    mut siblings: Vec<RemoteEntry>,
    count: Option<usize>,
    name: &str,
    now: DateTime<Local>,
) -> RotationPlan {
    let Some(count) = count else {
        return RotationPlan {
            remove: Vec::new(),
            dest_name: name.to_string(),
        };
    };

    siblings.sort_by_key(|entry| entry.created);

    let excess = siblings.len() as i64 - count as i64;
    let remove = if excess >= 0 {
        // One more than the overflow, making room for the new upload.
        siblings.drain(..(excess as usize + 1)).collect()
    } else {
        Vec::new()
    };

    RotationPlan {
        remove,
        dest_name: format!("{}_{}", name, now.format(TIME_FORMAT)),
    }
}
