use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::catalog::Emotion;
use crate::error::Result;

pub const RECENT_WINDOW: usize = 5;
pub const FREQUENCY_MIN_ENTRIES: usize = 3;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinEntry {
    pub timestamp: NaiveDateTime,
    pub text: String,
    pub emotion: Emotion,
    pub tip: String,
}

impl CheckinEntry {
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Session-scoped check-in log. Entries append in arrival order; views read
/// newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinHistory {
    entries: Vec<CheckinEntry>,
}

impl CheckinHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, text: impl Into<String>, emotion: Emotion, tip: impl Into<String>) {
        self.record_at(Local::now().naive_local(), text, emotion, tip);
    }

    pub fn record_at(
        &mut self,
        timestamp: NaiveDateTime,
        text: impl Into<String>,
        emotion: Emotion,
        tip: impl Into<String>,
    ) {
        self.entries.push(CheckinEntry {
            timestamp,
            text: text.into(),
            emotion,
            tip: tip.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CheckinEntry] {
        &self.entries
    }

    /// Up to the five most recent entries, newest first.
    pub fn recent(&self) -> Vec<&CheckinEntry> {
        self.entries.iter().rev().take(RECENT_WINDOW).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Emotion frequencies, descending, once at least three check-ins exist.
    pub fn frequency_counts(&self) -> Option<Vec<(Emotion, usize)>> {
        if self.entries.len() < FREQUENCY_MIN_ENTRIES {
            return None;
        }

        let mut counts: Vec<(Emotion, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(emotion, _)| *emotion == entry.emotion) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.emotion, 1)),
            }
        }
        counts.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.0.canonical_name().cmp(b.0.canonical_name()))
        });

        Some(counts)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
