use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_FILE: &str = "schedule.ical";
pub const DEFAULT_URL: &str = "http://mlb.am/tix/indians_schedule_full";

/// Where the raw calendar document comes from.
///
/// A local copy at `file` always wins; the feed at `url` is only downloaded
/// when that file does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub file: PathBuf,
    pub url: String,
    /// Save downloaded documents to `file` for the next run.
    pub cache: bool,
}

impl Default for Source {
    fn default() -> Self {
        Source {
            file: PathBuf::from(DEFAULT_FILE),
            url: String::from(DEFAULT_URL),
            cache: false,
        }
    }
}

impl Source {
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match fs::read(&self.file) {
            Ok(document) => {
                debug!(file = %self.file.display(), bytes = document.len(), "read local schedule");
                return Ok(document);
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(file = %self.file.display(), "no local schedule, downloading");
            }
            Err(source) => {
                return Err(Error::Read {
                    path: self.file.clone(),
                    source,
                })
            }
        }

        let document = download(&self.url)?;

        if self.cache {
            match fs::write(&self.file, &document) {
                Ok(()) => info!(file = %self.file.display(), "cached schedule"),
                Err(err) => warn!(file = %self.file.display(), %err, "failed to cache schedule"),
            }
        }

        Ok(document)
    }
}

fn download(url: &str) -> Result<Vec<u8>> {
    let fetch_error = |source| Error::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url).map_err(fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    let document = response.bytes().map_err(fetch_error)?;
    debug!(url, bytes = document.len(), "downloaded schedule");
    Ok(document.to_vec())
}
