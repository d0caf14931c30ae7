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

use anyhow::{Context, Result, bail};
use serde_json::json;

const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Forwards error-level messages to one or more Telegram chats.
///
/// This is a logging side channel only: the backup cycle never takes
/// decisions based on notifier availability.
pub struct TelegramNotifier {
    http: reqwest::blocking::Client,
    token: String,
    chat_ids: Vec<String>,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_ids: Vec<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            token,
            chat_ids,
        }
    }

    /// Sends `text` to every configured chat. Stops at the first failure.
    pub fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE_URL, self.token);
        for chat_id in &self.chat_ids {
            let response = self
                .http
                .post(&url)
                .json(&json!({ "chat_id": chat_id, "text": text }))
                .send()
                .with_context(|| "Could not reach the Telegram API")?;
            if !response.status().is_success() {
                bail!(
                    "Telegram rejected the notification for chat {}: HTTP {}",
                    chat_id,
                    response.status()
                );
            }
        }
        Ok(())
    }
}
