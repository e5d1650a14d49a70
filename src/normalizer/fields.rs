use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use crate::normalizer::raw::{RawRecord, RawValue};
use crate::{NormalizedRecord, Result};

pub const HEADER: [&str; 6] = [
    "ts",
    "Track Name",
    "Artist Name(s)",
    "ms_played",
    "Genres",
    "Artist Genres",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Current wall-clock time
    Now,
    Literal(&'static str),
    Zero,
    Empty,
}

/// Where one output column comes from: candidate source fields, first match wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub column: &'static str,
    pub sources: &'static [&'static str],
    pub fallback: Fallback,
}

impl FieldRule {
    fn pick<'r>(&self, raw: &'r RawRecord) -> Option<&'r RawValue> {
        self.sources
            .iter()
            .map(|field| raw.get(field))
            .find(|value| !value.is_empty())
    }
}

pub const FIELD_RULES: [FieldRule; 6] = [
    FieldRule {
        column: HEADER[0],
        sources: &["endTime", "ts", "end_time"],
        fallback: Fallback::Now,
    },
    FieldRule {
        column: HEADER[1],
        sources: &["trackName", "master_metadata_track_name", "track_name"],
        fallback: Fallback::Literal("Unknown Track"),
    },
    FieldRule {
        column: HEADER[2],
        sources: &["artistName", "master_metadata_album_artist_name", "artist_name"],
        fallback: Fallback::Literal("Unknown Artist"),
    },
    FieldRule {
        column: HEADER[3],
        sources: &["msPlayed", "ms_played"],
        fallback: Fallback::Zero,
    },
    // Exports never carry genres
    FieldRule {
        column: HEADER[4],
        sources: &[],
        fallback: Fallback::Empty,
    },
    FieldRule {
        column: HEADER[5],
        sources: &[],
        fallback: Fallback::Empty,
    },
];

pub type Clock = fn() -> DateTime<Utc>;

pub struct FieldNormalizer {
    clock: Clock,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldNormalizer {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn normalize(&self, raw: &RawRecord) -> NormalizedRecord {
        let [ts, track, artist, ms_played, genres, artist_genres] = &FIELD_RULES;

        NormalizedRecord {
            ts: self.text(raw, ts),
            track_name: self.text(raw, track),
            artist_name: self.text(raw, artist),
            ms_played: ms_played.pick(raw).map_or(0, coerce_millis),
            genres: self.text(raw, genres),
            artist_genres: self.text(raw, artist_genres),
        }
    }

    /// Fails when the entry is not a JSON object.
    pub fn normalize_value(&self, value: Value) -> Result<NormalizedRecord> {
        let raw = RawRecord::try_from(value)?;
        Ok(self.normalize(&raw))
    }

    fn text(&self, raw: &RawRecord, rule: &FieldRule) -> String {
        match rule.pick(raw) {
            Some(RawValue::Text(s)) => s.clone(),
            Some(RawValue::Integer(i)) => i.to_string(),
            Some(RawValue::Absent) | None => self.fallback_text(rule.fallback),
        }
    }

    fn fallback_text(&self, fallback: Fallback) -> String {
        match fallback {
            Fallback::Now => (self.clock)().to_rfc3339_opts(SecondsFormat::Secs, true),
            Fallback::Literal(s) => s.to_string(),
            Fallback::Zero => "0".to_string(),
            Fallback::Empty => String::new(),
        }
    }
}

fn coerce_millis(value: &RawValue) -> u64 {
    match value {
        RawValue::Integer(i) => (*i).max(0) as u64,
        RawValue::Text(s) => parse_millis(s.trim()),
        RawValue::Absent => 0,
    }
}

fn parse_millis(s: &str) -> u64 {
    if let Ok(i) = s.parse::<i64>() {
        return i.max(0) as u64;
    }
    if let Ok(u) = s.parse::<u64>() {
        return u;
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f as u64,
        Ok(f) if f.is_finite() => 0,
        _ => {
            log::debug!("Non-numeric ms_played {:?}, using 0", s);
            0
        }
    }
}
