// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Year-MonthName-Day-Hour:Minute:Second, e.g. `2024-Mar-05-14:02:59`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Appends `<timestamp>,<message>` lines to the stage log.
///
/// The file is opened and closed on every call. Write failures are reported
/// through tracing and never returned.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    path: PathBuf,
}

impl ProgressLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self, message: &str) {
        self.log_at(Local::now().naive_local(), message);
    }

    fn log_at(&self, now: NaiveDateTime, message: &str) {
        info!("{}", message);

        let line = format!("{},{}\n", now.format(TIMESTAMP_FORMAT), message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = written {
            warn!("Failed to append to {}: {}", self.path.display(), e);
        }
    }
}
