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

use colored::Colorize;

use crate::notify::TelegramNotifier;

/// Logging context for one backup run.
///
/// Constructed once in `main` and passed down explicitly; its lifecycle is
/// scoped to the run. Error-level messages are mirrored to Telegram when a
/// notifier is configured.
pub struct RunLog {
    quiet: bool,
    notifier: Option<TelegramNotifier>,
}

impl RunLog {
    pub fn new(quiet: bool, notifier: Option<TelegramNotifier>) -> Self {
        Self { quiet, notifier }
    }

    /// Prints a normal milestone (directory created, file uploaded, ...).
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}: {}", "Info".bold().green(), msg);
        }
    }

    /// Prints a warning. Warnings are never forwarded to the notifier.
    pub fn warning(&self, msg: &str) {
        eprintln!("{}: {}", "Warning".bold().yellow(), msg);
    }

    /// Prints an error and forwards it to the alert channel if one is
    /// configured. A notifier failure is reported as a warning and does not
    /// alter the outcome of the run.
    pub fn error(&self, msg: &str) {
        eprintln!("{}: {}", "Error".bold().red(), msg);
        if let Some(notifier) = &self.notifier
            && let Err(e) = notifier.send(&format!("Error: {msg}"))
        {
            self.warning(&format!("Could not send the alert notification: {e:#}"));
        }
    }
}
