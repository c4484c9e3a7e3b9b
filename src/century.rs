use crate::config::{BCE_MARKER, YEARS_PER_CENTURY};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]\s*-\s*[0-9]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    Bce,
    Ce,
}

impl Era {
    pub fn as_str(self) -> &'static str {
        match self {
            Era::Bce => "BCE",
            Era::Ce => "CE",
        }
    }
}

/// A century bucket such as `19th Century CE`.
///
/// Ordering follows the rendered label text, so `10th Century CE` sorts before
/// `3th Century BCE`. Use [`CenturyLabel::chronological_cmp`] for calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CenturyLabel {
    century: u32,
    era: Era,
    label: String,
}

impl CenturyLabel {
    /// Returns `None` for century zero, which has no label.
    pub fn new(century: u32, era: Era) -> Option<Self> {
        if century == 0 {
            return None;
        }
        let suffix = match era {
            Era::Bce => "th",
            Era::Ce => ordinal_suffix(century),
        };
        let label = format!("{}{} Century {}", century, suffix, era.as_str());
        Some(Self {
            century,
            era,
            label,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn century(&self) -> u32 {
        self.century
    }

    pub fn era(&self) -> Era {
        self.era
    }

    /// BCE labels always take `th`.
    pub fn suffix(&self) -> &'static str {
        match self.era {
            Era::Bce => "th",
            Era::Ce => ordinal_suffix(self.century),
        }
    }

    /// BCE centuries first, counting down, then CE centuries counting up.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.era, other.era) {
            (Era::Bce, Era::Bce) => other.century.cmp(&self.century),
            (Era::Ce, Era::Ce) => self.century.cmp(&other.century),
            (Era::Bce, Era::Ce) => Ordering::Less,
            (Era::Ce, Era::Bce) => Ordering::Greater,
        }
    }
}

impl fmt::Display for CenturyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Ord for CenturyLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label.cmp(&other.label)
    }
}

impl PartialOrd for CenturyLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn ordinal_suffix(n: u32) -> &'static str {
    if matches!(n % 100, 11..=13) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Classifies a free-form creation date into its century.
///
/// The year is every digit of the date read as one number, so `1,850 CE` is
/// the year 1850. Ranges such as `1798-1801 CE` use the part before the first
/// `-`. Any date containing `BCE` is placed in the BCE era. Returns `None` when
/// no positive year can be read.
pub fn classify(date: &str) -> Option<CenturyLabel> {
    if date.is_empty() {
        return None;
    }

    let era = if date.contains(BCE_MARKER) {
        Era::Bce
    } else {
        Era::Ce
    };

    let year = if YEAR_RANGE.is_match(date) {
        date.split_once('-').and_then(|(start, _)| parse_year(start))
    } else {
        parse_year(date)
    };

    match year {
        Some(year) => CenturyLabel::new(century_of(year), era),
        None => {
            warn!(date = date, "Unable to parse year from date");
            None
        }
    }
}

fn century_of(year: u32) -> u32 {
    (year - 1) / YEARS_PER_CENTURY + 1
}

fn parse_year(s: &str) -> Option<u32> {
    NON_DIGIT
        .replace_all(s, "")
        .parse::<u32>()
        .ok()
        .filter(|&year| year > 0)
}
