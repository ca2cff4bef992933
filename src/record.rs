/*! Sayings and the structured records produced for them.

[SayingEntry] is what ends up in a success artifact. [SayingRecord] is what a backend
returns for a single saying: the entry plus an optional echo of the original text, which is
never persisted in success artifacts. [BatchData] is the envelope a backend answers with.
!*/
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A saying read from disk. `content` is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SayingInput {
    pub path: PathBuf,
    pub content: String,
}

impl SayingInput {
    /// `content` is trimmed, a leading byte order mark included.
    pub fn new(path: PathBuf, content: &str) -> Self {
        Self {
            path,
            content: content.trim_start_matches('\u{FEFF}').trim().to_string(),
        }
    }

    /// Read and trim the saying stored at `path`.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|err| Error::Input {
            path: path.to_path_buf(),
            err,
        })?;
        Ok(Self::new(path.to_path_buf(), &content))
    }
}

/// Translation and metadata of a saying split in two parts.
///
/// Text fields default to empty strings when missing from a response,
/// so that incomplete splits reach validation instead of failing the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SayingEntry {
    /// First part of the saying in Luxembourgish
    #[serde(default)]
    pub lu_part1: String,
    /// Second part of the saying in Luxembourgish
    #[serde(default)]
    pub lu_part2: String,
    /// Literal but grammatically correct translation of the Luxembourgish saying, Part 1
    #[serde(default)]
    pub en_literal_translation_p1: String,
    /// Literal but grammatically correct translation of the Luxembourgish saying, Part 2
    #[serde(default)]
    pub en_literal_translation_p2: String,
    /// Closest real corresponding English saying of the Luxembourgish saying, Part 1
    #[serde(default)]
    pub en_closest_real_corresponding_saying_p1: String,
    /// Closest real corresponding English saying of the Luxembourgish saying, Part 2
    #[serde(default)]
    pub en_closest_real_corresponding_saying_p2: String,
    /// Popularity score (1-5) based on how common or well known the saying is in modern Luxembourgish.
    #[serde(rename = "culturalPopularity", deserialize_with = "score::required")]
    #[schemars(range(min = 1, max = 5))]
    pub cultural_popularity: u8,
    /// Difficulty score (1-5), based on how many uncommon or complicated words are used in the original Luxembourgish.
    #[serde(rename = "wordsDifficulty", deserialize_with = "score::required")]
    #[schemars(range(min = 1, max = 5))]
    pub words_difficulty: u8,
    /// Vulgarity score (1-5), where 1 is not vulgar at all and 5 is extremely offensive or inappropriate.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "score::optional"
    )]
    #[schemars(range(min = 1, max = 5))]
    pub vulgarity: Option<u8>,
}

/// A record as returned by a backend for one saying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SayingRecord {
    /// The original Luxembourgish saying provided in the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_lu: Option<String>,
    #[serde(flatten)]
    pub entry: SayingEntry,
}

impl From<SayingEntry> for SayingRecord {
    fn from(entry: SayingEntry) -> Self {
        Self {
            original_lu: None,
            entry,
        }
    }
}

/// Batch response envelope.
///
/// A `null` item stands for a saying the backend returned nothing for.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchData {
    /// List of analyzed and translated sayings
    pub sayings: Vec<Option<SayingRecord>>,
}

impl BatchData {
    /// JSON Schema of the envelope, as sent to backends.
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(BatchData)
    }
}

/// Score (de)serialization helpers.
///
/// Models sometimes quote numbers, so both `3` and `"3"` are accepted.
/// Anything outside of `1..=5` is rejected.
mod score {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    fn check(raw: Raw) -> Result<u8, String> {
        let value = match raw {
            Raw::Int(v) => v,
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("score {s:?} is not an integer"))?,
        };
        if (MIN..=MAX).contains(&value) {
            // range checked above
            Ok(value as u8)
        } else {
            Err(format!("score {value} is outside of {MIN}..={MAX}"))
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        check(Raw::deserialize(d)?).map_err(D::Error::custom)
    }

    pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
        Option::<Raw>::deserialize(d)?
            .map(check)
            .transpose()
            .map_err(D::Error::custom)
    }
}
