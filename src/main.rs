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

use anyhow::Result;
use clap::Parser;

use yadup::backup;
use yadup::cli::Cli;
use yadup::notify::TelegramNotifier;
use yadup::remote::yadisk::{Credentials, YaDisk};
use yadup::ui::RunLog;

fn run(args: &Cli, log: &RunLog) -> Result<()> {
    let client = YaDisk::new(Credentials {
        app_id: args.id.clone(),
        app_secret: args.password.clone(),
        token: args.token.clone(),
    })?;

    backup::run(
        &client,
        log,
        &args.source,
        &args.dest,
        args.count,
        &std::env::temp_dir(),
    )
}

fn main() {
    let args = Cli::parse();

    let notifier = match &args.tg_token {
        Some(token) if !args.tg_chat_ids.is_empty() => Some(TelegramNotifier::new(
            token.clone(),
            args.tg_chat_ids.clone(),
        )),
        _ => None,
    };
    let log = RunLog::new(args.quiet, notifier);

    if let Err(e) = run(&args, &log) {
        log.error(&format!("{e:#}"));
        std::process::exit(1);
    }

    log.info("Finished");
}
