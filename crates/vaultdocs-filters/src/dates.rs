//! Flexible date parsing and locale-aware date formatting.
//!
//! Page metadata carries dates in whatever shape authors typed them:
//! `2023-05-01`, `2023/05/01 10:30`, `May 1, 2023`, full RFC 3339 stamps.
//! [`parse_flexible`] accepts all of these; `-` and `/` date separators are
//! interchangeable.

use chrono::{
    DateTime, Datelike, FixedOffset, Locale, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};
use serde::Serialize;
use vaultdocs_core::{Error, Result};

/// Date-times with an explicit UTC offset (after `-` became `/`)
const OFFSET_FORMATS: &[&str] = &[
    "%Y/%m/%dT%H:%M:%S%.f%:z",
    "%Y/%m/%dT%H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S%.f%:z",
    "%Y/%m/%d %H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S%.f %z",
    "%Y/%m/%dT%H:%M%:z",
    "%Y/%m/%d %H:%M%:z",
];

/// Date-times without offset
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

/// Dates; the time defaults to midnight. Month-first wins for `01/05/2023`,
/// day-first applies once the day is above 12.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%A, %d %B %Y",
    "%A, %B %d, %Y",
    "%Y%m%d",
];

/// A parsed date-time, with or without a UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDateTime {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl ParsedDateTime {
    /// Wall-clock date-time, ignoring any offset
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            ParsedDateTime::Naive(dt) => *dt,
            ParsedDateTime::Offset(dt) => dt.naive_local(),
        }
    }

    /// UTC offset in `+HH:MM` form, if any
    pub fn offset(&self) -> Option<String> {
        match self {
            ParsedDateTime::Naive(_) => None,
            ParsedDateTime::Offset(dt) => Some(dt.format("%:z").to_string()),
        }
    }

    /// ISO 8601: `YYYY-MM-DDTHH:MM:SS`, microseconds only when non-zero,
    /// offset only when known.
    pub fn isoformat(&self) -> String {
        let naive = self.naive_local();
        let mut out = naive.format("%Y-%m-%dT%H:%M:%S").to_string();

        let micros = naive.nanosecond() / 1_000;
        if micros != 0 {
            out.push_str(&format!(".{:06}", micros));
        }

        if let Some(offset) = self.offset() {
            out.push_str(&offset);
        }
        out
    }

    /// Structured view for templates
    pub fn to_value(&self) -> DateTimeValue {
        let naive = self.naive_local();
        DateTimeValue {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
            second: naive.second(),
            microsecond: naive.nanosecond() / 1_000,
            weekday: naive.weekday().num_days_from_monday(),
            weekday_name: naive.format("%A").to_string(),
            offset: self.offset(),
            iso: self.isoformat(),
        }
    }
}

/// Date-time fields exposed to templates by `time_todatetime`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeValue {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    /// Monday is 0
    pub weekday: u32,
    pub weekday_name: String,
    pub offset: Option<String>,
    pub iso: String,
}

/// Replace `-` date separators with `/`
pub fn normalize_separators(input: &str) -> String {
    input.replace('-', "/")
}

/// Parse a date or date-time in any of the supported shapes.
///
/// RFC 3339 and RFC 2822 are tried on the raw input first so negative UTC
/// offsets survive; everything else is matched after separator normalization.
pub fn parse_flexible(input: &str) -> Result<ParsedDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::parse_error("empty date string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ParsedDateTime::Offset(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(ParsedDateTime::Offset(dt));
    }

    let normalized = normalize_separators(trimmed);

    // Trailing `Z` means UTC
    if let Some(stripped) = normalized
        .strip_suffix(['Z', 'z'])
        .filter(|s| s.ends_with(|c: char| c.is_ascii_digit()))
    {
        let naive = parse_naive(stripped)?;
        let utc = FixedOffset::east_opt(0).ok_or_else(|| Error::parse_error("invalid offset"))?;
        return utc
            .from_local_datetime(&naive)
            .single()
            .map(ParsedDateTime::Offset)
            .ok_or_else(|| Error::parse_error(format!("ambiguous date: {}", input)));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Ok(ParsedDateTime::Offset(dt));
        }
    }

    parse_naive(&normalized).map(ParsedDateTime::Naive)
}

fn parse_naive(normalized: &str) -> Result<NaiveDateTime> {
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(normalized, fmt) {
            return Ok(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(normalized, fmt) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    Err(Error::parse_error(format!(
        "unrecognized date format: {}",
        normalized
    )))
}

/// Parse a string produced by [`ParsedDateTime::isoformat`]
pub fn parse_iso(iso: &str) -> Result<ParsedDateTime> {
    if let Ok(dt) = DateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Ok(ParsedDateTime::Offset(dt));
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .map(ParsedDateTime::Naive)
        .map_err(|e| Error::parse_error(format!("not an ISO date-time ({}): {}", e, iso)))
}

/// Locales with a medium date pattern, keyed by language and territory
const LOCALES: &[(&str, &str, Locale)] = &[
    ("en", "US", Locale::en_US),
    ("en", "GB", Locale::en_GB),
    ("en", "AU", Locale::en_AU),
    ("en", "CA", Locale::en_CA),
    ("en", "IE", Locale::en_IE),
    ("en", "IN", Locale::en_IN),
    ("en", "NZ", Locale::en_NZ),
    ("fr", "FR", Locale::fr_FR),
    ("fr", "BE", Locale::fr_BE),
    ("fr", "CA", Locale::fr_CA),
    ("fr", "CH", Locale::fr_CH),
    ("de", "DE", Locale::de_DE),
    ("de", "AT", Locale::de_AT),
    ("de", "CH", Locale::de_CH),
    ("es", "ES", Locale::es_ES),
    ("es", "MX", Locale::es_MX),
    ("it", "IT", Locale::it_IT),
    ("pt", "BR", Locale::pt_BR),
    ("pt", "PT", Locale::pt_PT),
    ("nl", "NL", Locale::nl_NL),
    ("nl", "BE", Locale::nl_BE),
    ("sv", "SE", Locale::sv_SE),
    ("pl", "PL", Locale::pl_PL),
    ("ru", "RU", Locale::ru_RU),
    ("ja", "JP", Locale::ja_JP),
    ("zh", "CN", Locale::zh_CN),
];

/// Territory used when only a language is given (`fr` -> `fr_FR`)
fn default_territory(language: &str) -> Option<&'static str> {
    LOCALES
        .iter()
        .find(|(lang, _, _)| *lang == language)
        .map(|(_, territory, _)| *territory)
}

/// Resolve `fr`, `fr_FR` or `fr-FR` to a supported locale.
///
/// Returns the canonical `lang_TERRITORY` name alongside the locale.
pub fn resolve_locale(identifier: &str) -> Option<(String, Locale)> {
    let normalized = identifier.trim().replace('-', "_");
    let mut parts = normalized.splitn(2, '_');
    let language = parts.next()?.to_ascii_lowercase();
    let territory = match parts.next() {
        // Drop encodings and modifiers: `de_DE.UTF-8`, `sr_RS@latin`
        Some(rest) => rest
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase(),
        None => default_territory(&language)?.to_string(),
    };

    LOCALES
        .iter()
        .find(|(lang, terr, _)| *lang == language && *terr == territory)
        .or_else(|| LOCALES.iter().find(|(lang, _, _)| *lang == language))
        .map(|(lang, terr, locale)| (format!("{}_{}", lang, terr), *locale))
}

/// Medium-length date pattern (CLDR style) for a canonical locale name
fn medium_pattern(canonical: &str) -> &'static str {
    match canonical {
        "en_US" | "en_CA" => "%b %-d, %Y",
        "en_GB" | "en_AU" | "en_IE" | "en_IN" | "en_NZ" => "%-d %b %Y",
        c if c.starts_with("de_") => "%d.%m.%Y",
        c if c.starts_with("pt_") => "%-d de %b de %Y",
        c if c.starts_with("ja_") => "%Y/%m/%d",
        c if c.starts_with("zh_") => "%Y年%-m月%-d日",
        c if c.starts_with("pl_") || c.starts_with("ru_") => "%-d %b %Y",
        _ => "%-d %b %Y",
    }
}

/// Format a date with the medium pattern of `locale`.
///
/// Unknown locales fall back to US English.
pub fn format_localized(parsed: &ParsedDateTime, locale: &str) -> String {
    let (canonical, chrono_locale) = resolve_locale(locale).unwrap_or_else(|| {
        log::warn!("Unknown locale '{}', formatting as en_US", locale);
        ("en_US".to_string(), Locale::en_US)
    });

    Utc.from_utc_datetime(&parsed.naive_local())
        .format_localized(medium_pattern(&canonical), chrono_locale)
        .to_string()
}
