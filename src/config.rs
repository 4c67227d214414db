use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use getopts::{Matches, Options};

use crate::error::{Error, Result};
use crate::source::{Source, DEFAULT_FILE, DEFAULT_URL};

pub const FILE_VAR: &str = "SCHEDULE_FILE";
pub const URL_VAR: &str = "SCHEDULE_URL";
pub const TZ_VAR: &str = "SCHEDULE_TZ";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub source: Source,
    /// Print the whole schedule before the window.
    pub all: bool,
    /// Day to center the window on instead of today.
    pub date: Option<NaiveDate>,
    /// Zone to show times in instead of the local one.
    pub timezone: Option<Tz>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(Args),
    Help(String),
}

/// Values taken from the environment before the command line is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub file: Option<String>,
    pub url: Option<String>,
    pub timezone: Option<String>,
}

impl Defaults {
    pub fn from_env() -> Self {
        Defaults {
            file: env::var(FILE_VAR).ok(),
            url: env::var(URL_VAR).ok(),
            timezone: env::var(TZ_VAR).ok(),
        }
    }
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "f",
        "file",
        "Local copy of the schedule, read instead of downloading when it exists [Default: schedule.ical]",
        "PATH",
    );
    opts.optopt(
        "u",
        "url",
        "Calendar feed to download when there is no local copy",
        "URL",
    );
    opts.optflag(
        "c",
        "cache",
        "Save a downloaded feed as the local copy [Default: false]",
    );
    opts.optflag(
        "a",
        "all",
        "Print every event before the upcoming ones; any extra argument does the same",
    );
    opts.optopt(
        "d",
        "date",
        "Show the games around this day instead of today",
        "YYYY-MM-DD",
    );
    opts.optopt(
        "z",
        "timezone",
        "Show times in this zone instead of the local one",
        "NAME",
    );
    opts
}

pub fn usage() -> String {
    let opts = opts();
    opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME")))
}

/// Parses command-line arguments (without the program name).
pub fn parse(args: &[String], defaults: Defaults) -> Result<Invocation> {
    let matches = opts()
        .parse(args)
        .map_err(|fail| Error::Usage(fail.to_string()))?;

    if matches.opt_present("help") {
        return Ok(Invocation::Help(usage()));
    }

    let file = matches
        .opt_str("file")
        .or(defaults.file)
        .unwrap_or_else(|| DEFAULT_FILE.to_string());
    let url = matches
        .opt_str("url")
        .or(defaults.url)
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let date = matches
        .opt_str("date")
        .map(|date| {
            NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|err| {
                Error::Usage(format!("Provided value for option 'date' is invalid: {err}"))
            })
        })
        .transpose()?;

    let timezone = timezone(&matches, defaults.timezone)?;

    Ok(Invocation::Run(Args {
        source: Source {
            file: PathBuf::from(file),
            url,
            cache: matches.opt_present("cache"),
        },
        all: matches.opt_present("all") || !matches.free.is_empty(),
        date,
        timezone,
    }))
}

fn timezone(matches: &Matches, default: Option<String>) -> Result<Option<Tz>> {
    let Some(name) = matches.opt_str("timezone").or(default) else {
        return Ok(None);
    };

    name.parse::<Tz>().map(Some).map_err(|err| {
        Error::Usage(format!(
            "Provided value for option 'timezone' is invalid: {err}"
        ))
    })
}
