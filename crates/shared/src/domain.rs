use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

macro_rules! string_id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id_newtype!(EventId);

/// Wire format for occurrence times. Input also accepts seconds.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|err| de::Error::custom(format!("invalid time '{raw}': {err}")))
    }
}

/// One dated time slot of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub start_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
}

impl Occurrence {
    pub fn new(start_date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_date,
            start_time,
            end_time,
        }
    }

    /// Parses `YYYY-MM-DD`, `HH:MM`, `HH:MM` triples as typed by a user.
    pub fn parse(date: &str, start: &str, end: &str) -> Result<Self, chrono::ParseError> {
        let start_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?;
        let start_time = NaiveTime::parse_from_str(start.trim(), "%H:%M")?;
        let end_time = NaiveTime::parse_from_str(end.trim(), "%H:%M")?;
        Ok(Self::new(start_date, start_time, end_time))
    }

    pub fn ends_after_start(&self) -> bool {
        self.end_time > self.start_time
    }
}

/// Image reference. Pending uploads carry the image inline as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_data: Option<String>,
}

impl ImageRef {
    pub fn hosted(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            encoded_data: None,
        }
    }

    pub fn upload(encoded_data: impl Into<String>) -> Self {
        Self {
            url: None,
            encoded_data: Some(encoded_data.into()),
        }
    }

    pub fn is_fresh_upload(&self) -> bool {
        self.encoded_data
            .as_deref()
            .is_some_and(|data| !data.is_empty())
    }

    /// What a banner should display: the inline data for uploads, else the hosted URL.
    pub fn display_source(&self) -> Option<&str> {
        if self.is_fresh_upload() {
            self.encoded_data.as_deref()
        } else {
            self.url.as_deref()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
}

/// Event record as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Organizer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
