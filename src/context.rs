//! Observation context: the date / timezone / site triple a plot is computed for.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timezones offered by the settings form. Any IANA zone string is accepted.
pub const KNOWN_TIMEZONES: &[&str] = &["Asia/Tokyo", "America/New_York", "Europe/London"];

pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

/// Observing sites known to the plot service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[default]
    #[serde(rename = "omu1p85m")]
    Omu1p85m,
    #[serde(rename = "nanten2")]
    Nanten2,
    #[serde(rename = "nro45")]
    Nro45,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::Omu1p85m, Site::Nanten2, Site::Nro45];

    /// Identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Site::Omu1p85m => "omu1p85m",
            Site::Nanten2 => "nanten2",
            Site::Nro45 => "nro45",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Site::Omu1p85m => "1.85m Telescope",
            Site::Nanten2 => "NANTEN2",
            Site::Nro45 => "NRO 45m Telescope",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Site::ALL
            .into_iter()
            .find(|site| site.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = Site::ALL.iter().map(Site::id).collect();
                format!("unknown site {s:?} (known: {})", known.join(", "))
            })
    }
}

/// Date, timezone and site. A field set to `None` models an incomplete form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationContext {
    pub date: Option<NaiveDate>,
    pub timezone: Option<String>,
    pub site: Option<Site>,
}

impl Default for ObservationContext {
    /// Today's UTC date, [`DEFAULT_TIMEZONE`] and the default site.
    fn default() -> Self {
        Self {
            date: Some(Utc::now().date_naive()),
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
            site: Some(Site::default()),
        }
    }
}

impl ObservationContext {
    /// All fields unset.
    pub fn unset() -> Self {
        Self {
            date: None,
            timezone: None,
            site: None,
        }
    }

    /// The three fields, if every one of them is set.
    pub fn complete(&self) -> Option<(NaiveDate, &str, Site)> {
        match (&self.date, self.timezone.as_deref(), &self.site) {
            (Some(d), Some(tz), Some(s)) if !tz.trim().is_empty() => Some((*d, tz, *s)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_parses_case_insensitively() {
        assert_eq!("NANTEN2".parse::<Site>().unwrap(), Site::Nanten2);
        assert_eq!(" nro45 ".parse::<Site>().unwrap(), Site::Nro45);
        let err = "alma".parse::<Site>().unwrap_err();
        assert!(err.contains("omu1p85m"));
    }

    #[test]
    fn completeness_requires_all_fields() {
        let mut ctx = ObservationContext::default();
        assert!(ctx.is_complete());
        ctx.timezone = Some("  ".into());
        assert!(!ctx.is_complete());
        ctx.timezone = Some("Europe/London".into());
        ctx.site = None;
        assert!(!ctx.is_complete());
    }
}
