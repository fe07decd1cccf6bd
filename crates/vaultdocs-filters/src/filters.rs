//! Template filters.
//!
//! Each filter exists twice: a plain function usable from Rust, and a Tera
//! adapter with the `fn(&Value, &HashMap<String, Value>) -> Result<Value>`
//! shape that [`crate::setup_environment`] registers.

use std::collections::HashMap;
use std::path::Path;

use tera::{Result, Value};

use crate::dates::{self, ParsedDateTime};

/// Default locale for `to_local_time` when the template passes none
pub const DEFAULT_LOCALE: &str = "en_US";

/// Log target for the `log` filter
pub const TEMPLATE_LOG_TARGET: &str = "vaultdocs::template";

/// Format a date as `DD Month YYYY`.
///
/// The value is parsed, rendered to ISO 8601 and parsed again before
/// formatting. If that second parse fails, the ISO string of the first parse
/// is returned. Unparsable input is returned unchanged.
pub fn convert_time(time: &str) -> String {
    match dates::parse_flexible(time) {
        Ok(parsed) => day_month_year(&parsed.isoformat()),
        Err(e) => {
            log::warn!("convert_time: value error for {:?}: {}", time, e);
            time.to_string()
        }
    }
}

/// `DD Month YYYY` for an ISO 8601 string, or the string itself when it does
/// not parse back
fn day_month_year(iso: &str) -> String {
    match dates::parse_iso(iso) {
        Ok(reparsed) => reparsed.naive_local().format("%d %B %Y").to_string(),
        Err(e) => {
            log::debug!("convert_time: falling back to {}: {}", iso, e);
            iso.to_string()
        }
    }
}

/// ISO 8601 form of a date; unparsable input is returned unchanged
pub fn iso_time(time: &str) -> String {
    match dates::parse_flexible(time) {
        Ok(parsed) => parsed.isoformat(),
        Err(e) => {
            log::debug!("iso_time: leaving {:?} as is: {}", time, e);
            time.to_string()
        }
    }
}

/// Parse a date into a structured date-time
pub fn time_todatetime(time: &str) -> vaultdocs_core::Result<ParsedDateTime> {
    dates::parse_flexible(time)
}

/// Whether a file exists at `page`
pub fn page_exists(page: &str) -> bool {
    Path::new(page).exists()
}

/// Percent-decode a URL component.
///
/// Invalid UTF-8 sequences become U+FFFD; `+` is left alone.
pub fn url_decode(url: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(url.as_bytes())).into_owned()
}

/// Emit a value on the console log; returns an empty string
pub fn log_value(text: &str) -> String {
    log::info!(target: TEMPLATE_LOG_TARGET, "{}", text);
    String::new()
}

/// Format a date with a locale's medium date pattern.
///
/// Unparsable input is returned unchanged.
pub fn to_local_time(time: &str, locale: &str) -> String {
    match dates::parse_flexible(time) {
        Ok(parsed) => dates::format_localized(&parsed, locale),
        Err(e) => {
            log::warn!("to_local_time: cannot parse {:?}: {}", time, e);
            time.to_string()
        }
    }
}

/// Template values arrive as JSON; strings are used verbatim, anything else
/// in its JSON form.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn convert_time_filter(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(convert_time(&as_text(value))))
}

pub(crate) fn iso_time_filter(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(iso_time(&as_text(value))))
}

pub(crate) fn time_todatetime_filter(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let text = as_text(value);
    match time_todatetime(&text) {
        Ok(parsed) => tera::to_value(parsed.to_value())
            .map_err(|e| tera::Error::msg(format!("time_todatetime: {}", e))),
        Err(e) => {
            log::warn!("time_todatetime: cannot parse {:?}: {}", text, e);
            Ok(value.clone())
        }
    }
}

pub(crate) fn page_exists_filter(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::Bool(page_exists(&as_text(value))))
}

pub(crate) fn url_decode_filter(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(url_decode(&as_text(value))))
}

pub(crate) fn log_filter(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(log_value(&as_text(value))))
}

pub(crate) fn to_local_time_filter(value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
    let locale = args
        .get("locale")
        .map(as_text)
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    Ok(Value::String(to_local_time(&as_text(value), &locale)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_convert_time() {
        assert_eq!(convert_time("2023-05-01"), "01 May 2023");
        assert_eq!(convert_time("2023/05/01"), "01 May 2023");
        assert_eq!(convert_time("2023-12-25T18:00:00+01:00"), "25 December 2023");
        assert_eq!(convert_time("2023-05-01T10:30:00-05:00"), "01 May 2023");
    }

    #[test]
    fn test_day_month_year_falls_back_to_iso_string() {
        assert_eq!(day_month_year("2023-05-01T10:30:00"), "01 May 2023");
        assert_eq!(day_month_year("2023-05-01T10:30:00-05:00"), "01 May 2023");
        assert_eq!(day_month_year("2023/05/01 10:30"), "2023/05/01 10:30");
    }

    #[test]
    fn test_convert_time_invalid_returns_input() {
        assert_eq!(convert_time("sometime soon"), "sometime soon");
        assert_eq!(convert_time(""), "");
    }

    #[test]
    fn test_iso_time() {
        assert_eq!(iso_time("2023/05/01"), "2023-05-01T00:00:00");
        assert_eq!(iso_time("2023-05-01"), "2023-05-01T00:00:00");
        assert_eq!(iso_time("2023-05-01 08:15"), "2023-05-01T08:15:00");
        assert_eq!(
            iso_time("2023-05-01T10:30:00-05:00"),
            "2023-05-01T10:30:00-05:00"
        );
        assert_eq!(iso_time("garbage"), "garbage");
    }

    #[test]
    fn test_time_todatetime() {
        let parsed = time_todatetime("2023-05-01T10:00:00").unwrap();
        assert_eq!(parsed.isoformat(), "2023-05-01T10:00:00");
        assert!(time_todatetime("nope").is_err());
    }

    #[test]
    fn test_page_exists() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("page.md");
        let file_str = file.to_str().unwrap();

        assert!(!page_exists(file_str));
        std::fs::write(&file, "# Page").unwrap();
        assert!(page_exists(file_str));
        assert!(page_exists(file_str));
        assert!(!page_exists("/nonexistent/path"));
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("a%20b"), "a b");
        assert_eq!(url_decode("caf%C3%A9%2Fmenu"), "café/menu");
        assert_eq!(url_decode("a+b"), "a+b");
        assert_eq!(url_decode("%FF"), "\u{FFFD}");

        let decoded = url_decode("My%20Note");
        assert_eq!(url_decode(&decoded), decoded);
    }

    #[test]
    fn test_log_value_returns_empty() {
        assert_eq!(log_value("debugging"), "");
    }

    #[test]
    fn test_to_local_time() {
        let en = to_local_time("2023-05-01", "en");
        let fr = to_local_time("2023-05-01", "fr");
        assert_eq!(en, "May 1, 2023");
        assert_eq!(fr, "1 mai 2023");
        assert_ne!(en, fr);
        assert_eq!(to_local_time("later", "fr"), "later");
        assert_eq!(to_local_time("2023-05-01T23:30:00-05:00", "fr"), "1 mai 2023");
    }

    #[test]
    fn test_filter_adapters() {
        let args = HashMap::new();
        assert_eq!(
            convert_time_filter(&Value::from("2023-05-01"), &args).unwrap(),
            Value::from("01 May 2023")
        );
        assert_eq!(
            page_exists_filter(&Value::from("/nonexistent/path"), &args).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(log_filter(&Value::from(42), &args).unwrap(), Value::from(""));

        let parsed = time_todatetime_filter(&Value::from("2023-05-01"), &args).unwrap();
        assert_eq!(parsed["year"], Value::from(2023));
        let untouched = time_todatetime_filter(&Value::from("n/a"), &args).unwrap();
        assert_eq!(untouched, Value::from("n/a"));

        let mut fr = HashMap::new();
        fr.insert("locale".to_string(), Value::from("fr_FR"));
        assert_eq!(
            to_local_time_filter(&Value::from("2023-05-01"), &fr).unwrap(),
            Value::from("1 mai 2023")
        );
        assert_eq!(
            to_local_time_filter(&Value::from("2023-05-01"), &args).unwrap(),
            Value::from("May 1, 2023")
        );
    }
}
