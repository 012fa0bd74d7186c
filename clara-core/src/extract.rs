use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Page suffix pattern: `<space>DD-MM-YYYY.p.PAGE.ext` anchored at the end of the name.
///
/// The extension must be a single segment, so `x 09-10-1941.p.1.tar.gz` does not match.
const PAGE_PATTERN: &str = r"\s([0-9]{2})-([0-9]{2})-([0-9]{4})\.p\.([0-9]+)\.[^.]+$";

fn page_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PAGE_PATTERN).unwrap_or_else(|e| panic!("bad page pattern: {e}")))
}

/// Date and page number embedded in a scanned page filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// UTC midnight of the embedded calendar day
    pub date: DateTime<Utc>,
    /// Saturates at `u64::MAX` for longer digit runs
    pub page: u64,
}

/// A file eligible for renaming, with the metadata extracted from its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    name: String,
    date: DateTime<Utc>,
    page: u64,
}

impl Candidate {
    /// Build a candidate from a filename, or `None` when the name carries no valid metadata
    pub fn from_name(name: &str) -> Option<Self> {
        let info = extract(name)?;
        Some(Self {
            name: name.to_string(),
            date: info.date,
            page: info.page,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn page(&self) -> u64 {
        self.page
    }
}

/// Extract the embedded date and page from a filename.
///
/// Returns `None` when the name does not have the exact
/// `... DD-MM-YYYY.p.PAGE.ext` shape, when the day/month pair is not a real
/// calendar date (no rollover, `31-02-1941` is rejected). A page number
/// longer than a `u64` is kept at `u64::MAX`.
pub fn extract(filename: &str) -> Option<PageInfo> {
    let caps = page_regex().captures(filename)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    // The pattern only admits digits, so overflow is the one parse failure
    let page = caps[4].parse::<u64>().unwrap_or(u64::MAX);

    let date = NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();

    Some(PageInfo { date, page })
}
