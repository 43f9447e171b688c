//! Line formatting: `"<timestamp> [<LEVEL>] <message>\n"`.
//!
//! Every logger owns its own [`Formatter`], so changing the timestamp
//! layout of one handle never affects another.

use std::borrow::Cow;
use std::fmt;

use time::OffsetDateTime;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::{BorrowedFormatItem, OwnedFormatItem};
use time::macros::format_description;

use crate::{Error, Level, Result};

/// `Jan 2, 2006 15:04:05.000000 +00:00`
const DEFAULT_LAYOUT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year] [hour]:[minute]:[second].[subsecond digits:6] [offset_hour sign:mandatory]:[offset_minute]"
);

/// Timestamp layout used at the start of every line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// Human readable with microseconds and UTC offset.
    #[default]
    Default,
    /// `2006-01-02T15:04:05.999999Z`
    Rfc3339,
    /// `Mon, 02 Jan 2006 15:04:05 +0000`
    Rfc2822,
    /// One of the named layouts accepted by [`TimestampFormat::from_name`].
    Preset(&'static [BorrowedFormatItem<'static>]),
    /// A `time` format description, e.g. `"[hour]:[minute]:[second]"`.
    Custom(OwnedFormatItem),
}

/// Named layouts besides `default`, `rfc3339` and `rfc2822`.
const PRESETS: &[(&str, &[BorrowedFormatItem<'static>])] = &[
    // 3:04PM
    (
        "kitchen",
        format_description!("[hour repr:12 padding:none]:[minute][period]"),
    ),
    // Mon Jan  2 15:04:05 2006
    (
        "ansic",
        format_description!(
            "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
        ),
    ),
    // Mon, 02 Jan 2006 15:04:05 +0000
    (
        "rfc1123z",
        format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
        ),
    ),
    (
        "stamp",
        format_description!("[month repr:short] [day padding:space] [hour]:[minute]:[second]"),
    ),
    (
        "stampmilli",
        format_description!(
            "[month repr:short] [day padding:space] [hour]:[minute]:[second].[subsecond digits:3]"
        ),
    ),
    (
        "stampmicro",
        format_description!(
            "[month repr:short] [day padding:space] [hour]:[minute]:[second].[subsecond digits:6]"
        ),
    ),
    (
        "stampnano",
        format_description!(
            "[month repr:short] [day padding:space] [hour]:[minute]:[second].[subsecond digits:9]"
        ),
    ),
    (
        "datetime",
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ),
    ("dateonly", format_description!("[year]-[month]-[day]")),
    ("timeonly", format_description!("[hour]:[minute]:[second]")),
];

impl TimestampFormat {
    /// Parse a custom `time` format description.
    pub fn custom(description: &str) -> Result<Self> {
        time::format_description::parse_owned::<1>(description)
            .map(TimestampFormat::Custom)
            .map_err(|e| Error::TimestampFormat(e.to_string()))
    }

    /// Resolve a configured name: `default`, `rfc3339`, `rfc2822`, one of
    /// `kitchen`, `ansic`, `rfc1123z`, `stamp`, `stampmilli`, `stampmicro`,
    /// `stampnano`, `datetime`, `dateonly`, `timeonly` (case-insensitive),
    /// or else a custom description.
    pub fn from_name(name: &str) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "" | "default" => Ok(Self::Default),
            "rfc3339" => Ok(Self::Rfc3339),
            "rfc2822" => Ok(Self::Rfc2822),
            _ => match PRESETS.iter().find(|(preset, _)| *preset == key) {
                Some((_, items)) => Ok(Self::Preset(*items)),
                None => Self::custom(name),
            },
        }
    }

    /// Render `at` in this layout.
    pub fn render(&self, at: OffsetDateTime) -> String {
        let rendered = match self {
            Self::Default => at.format(DEFAULT_LAYOUT),
            Self::Rfc3339 => at.format(&Rfc3339),
            Self::Rfc2822 => at.format(&Rfc2822),
            Self::Preset(items) => at.format(*items),
            Self::Custom(items) => at.format(items),
        };
        // Well-known layouts reject some years and offsets; keep the line.
        rendered.unwrap_or_else(|_| at.unix_timestamp().to_string())
    }
}

/// The message part of a log call.
///
/// Either a pre-rendered string, a template with its substitution values
/// (built by `format_args!` and the crate's macros), or a single value
/// rendered through its `Display` or `Debug` implementation.
pub enum Payload<'a> {
    Text(Cow<'a, str>),
    Template(fmt::Arguments<'a>),
    Value(&'a dyn fmt::Display),
    Debug(&'a dyn fmt::Debug),
}

impl<'a> Payload<'a> {
    /// Render any `Display` value.
    pub fn value(value: &'a dyn fmt::Display) -> Self {
        Payload::Value(value)
    }

    /// Render any `Debug` value, such as a `Vec` or a map.
    pub fn debug(value: &'a dyn fmt::Debug) -> Self {
        Payload::Debug(value)
    }
}

impl fmt::Display for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => f.write_str(text),
            Payload::Template(args) => f.write_fmt(*args),
            Payload::Value(value) => fmt::Display::fmt(value, f),
            Payload::Debug(value) => write!(f, "{:?}", value),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(s: &'a str) -> Self {
        Payload::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(s: &'a String) -> Self {
        Payload::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Payload<'_> {
    fn from(s: String) -> Self {
        Payload::Text(Cow::Owned(s))
    }
}

impl<'a> From<fmt::Arguments<'a>> for Payload<'a> {
    fn from(args: fmt::Arguments<'a>) -> Self {
        Payload::Template(args)
    }
}

/// Turns a level and payload into one terminated line of text.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    timestamp: TimestampFormat,
}

impl Formatter {
    pub fn new(timestamp: TimestampFormat) -> Self {
        Self { timestamp }
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp
    }

    /// Format a line stamped with the current local time (UTC when the
    /// local offset cannot be determined).
    pub fn format(&self, level: Level, payload: &Payload<'_>) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.format_at(now, level, payload)
    }

    /// Format a line stamped with `at`.
    pub fn format_at(
        &self,
        at: OffsetDateTime,
        level: Level,
        payload: &Payload<'_>,
    ) -> String {
        format!("{} [{}] {}\n", self.timestamp.render(at), level, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use time::macros::datetime;

    const AT: OffsetDateTime = datetime!(2023-01-02 15:04:05.123456 +00:00);

    #[test]
    fn test_default_layout() {
        let formatter = Formatter::default();
        let line = formatter.format_at(AT, Level::Info, &"hello".into());
        assert_eq!(line, "Jan 2, 2023 15:04:05.123456 +00:00 [INFO] hello\n");
    }

    #[test]
    fn test_well_known_layouts() {
        let rfc3339 = TimestampFormat::Rfc3339.render(AT);
        assert!(rfc3339.starts_with("2023-01-02T15:04:05"));

        let rfc2822 = TimestampFormat::Rfc2822.render(AT);
        assert!(rfc2822.contains("02 Jan 2023 15:04:05"));
    }

    #[test]
    fn test_custom_layout() {
        let format = TimestampFormat::custom("[hour]:[minute]:[second]").unwrap();
        let formatter = Formatter::new(format);
        let line = formatter.format_at(AT, Level::Critical, &"boom".into());
        assert_eq!(line, "15:04:05 [CRITICAL] boom\n");
    }

    #[test]
    fn test_invalid_custom_layout() {
        let err = TimestampFormat::custom("[not_a_component]").unwrap_err();
        assert!(matches!(err, Error::TimestampFormat(_)));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            TimestampFormat::from_name("RFC3339").unwrap(),
            TimestampFormat::Rfc3339
        );
        assert_eq!(
            TimestampFormat::from_name("rfc2822").unwrap(),
            TimestampFormat::Rfc2822
        );
        assert_eq!(
            TimestampFormat::from_name("default").unwrap(),
            TimestampFormat::Default
        );
        assert!(matches!(
            TimestampFormat::from_name("[year]").unwrap(),
            TimestampFormat::Custom(_)
        ));
    }

    #[test]
    fn test_named_presets() {
        let render = |name: &str| TimestampFormat::from_name(name).unwrap().render(AT);

        assert_eq!(render("Kitchen"), "3:04PM");
        assert_eq!(render("ANSIC"), "Mon Jan  2 15:04:05 2023");
        assert_eq!(render("rfc1123z"), "Mon, 02 Jan 2023 15:04:05 +0000");
        assert_eq!(render("stamp"), "Jan  2 15:04:05");
        assert_eq!(render("StampMilli"), "Jan  2 15:04:05.123");
        assert_eq!(render("stampmicro"), "Jan  2 15:04:05.123456");
        assert_eq!(render("stampnano"), "Jan  2 15:04:05.123456000");
        assert_eq!(render("DateTime"), "2023-01-02 15:04:05");
        assert_eq!(render("dateonly"), "2023-01-02");
        assert_eq!(render("timeonly"), "15:04:05");
    }

    #[test]
    fn test_payload_variants() {
        assert_eq!(Payload::from("text").to_string(), "text");
        assert_eq!(Payload::from(String::from("owned")).to_string(), "owned");
        assert_eq!(
            Payload::from(format_args!("n={} ok={}", 2023, true)).to_string(),
            "n=2023 ok=true"
        );
        assert_eq!(Payload::value(&15.3).to_string(), "15.3");
        assert_eq!(Payload::value(&false).to_string(), "false");

        let animals = vec!["dog", "cat"];
        assert_eq!(Payload::debug(&animals).to_string(), r#"["dog", "cat"]"#);

        let map = BTreeMap::from([("cat", 3), ("dog", 1)]);
        assert_eq!(Payload::debug(&map).to_string(), r#"{"cat": 3, "dog": 1}"#);
    }
}
