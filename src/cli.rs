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

use std::path::PathBuf;

use clap::Parser;

// CLI arguments
#[derive(Parser, Debug)]
#[clap(
    version = env!("CARGO_PKG_VERSION"), // Version from crate metadata
    about = "Backs up a local directory to Yandex.Disk"
)]
pub struct Cli {
    /// Application ID
    #[clap(short = 'i', long, value_parser)]
    pub id: String,

    /// Application secret
    #[clap(short = 'p', long, value_parser)]
    pub password: String,

    /// OAuth token
    #[clap(short = 't', long, value_parser)]
    pub token: String,

    /// Local directory to archive
    #[clap(short = 's', long, value_parser = parse_existing_path)]
    pub source: PathBuf,

    /// Remote destination directory
    #[clap(short = 'd', long, value_parser)]
    pub dest: String,

    /// Number of backups to keep. Omitting it disables rotation and
    /// overwrites a single remote directory instead.
    #[clap(short = 'c', long, value_parser = parse_retention_count)]
    pub count: Option<usize>,

    /// Telegram token for error notifications
    #[clap(short = 'g', long = "tg_token", value_parser)]
    pub tg_token: Option<String>,

    /// Telegram chat id to notify. Can be given multiple times.
    #[clap(short = 'a', long = "tg_chat_id", value_parser)]
    pub tg_chat_ids: Vec<String>,

    /// Suppress normal output
    #[clap(long, value_parser)]
    pub quiet: bool,
}

fn parse_existing_path(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("'{arg}' does not exist"))
    }
}

fn parse_retention_count(arg: &str) -> Result<usize, String> {
    arg.parse::<i64>()
        .ok()
        .filter(|count| *count > 0)
        .map(|count| count as usize)
        .ok_or_else(|| String::from("must be a positive integer"))
}
