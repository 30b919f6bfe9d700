use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    System,
    Advisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
}

/// Persisted form of [`AdvisorMessage`]; the instant travels as RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}

impl From<&AdvisorMessage> for SavedMessage {
    fn from(message: &AdvisorMessage) -> Self {
        Self {
            id: message.id.clone(),
            sender: message.sender,
            text: message.text.clone(),
            timestamp: message.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            severity: message.severity,
        }
    }
}

impl SavedMessage {
    /// Unparsable timestamps are replaced by `fallback` instead of failing.
    pub fn restore(self, fallback: DateTime<Utc>) -> AdvisorMessage {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| {
                tracing::warn!(id = %self.id, raw = %self.timestamp, "unreadable message timestamp");
                fallback
            });
        AdvisorMessage {
            id: self.id,
            sender: self.sender,
            text: self.text,
            timestamp,
            severity: self.severity,
        }
    }
}

/// Message feed, newest first. Entries are only ever added at the head.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    entries: Vec<AdvisorMessage>,
    next_seq: u64,
}

impl MessageLog {
    pub fn from_entries(entries: Vec<AdvisorMessage>) -> Self {
        let next_seq = entries.len() as u64;
        Self { entries, next_seq }
    }

    pub fn post(
        &mut self,
        sender: Sender,
        severity: Severity,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &AdvisorMessage {
        self.next_seq += 1;
        let message = AdvisorMessage {
            id: format!("{}-{}", now.timestamp_millis(), self.next_seq),
            sender,
            text: text.into(),
            timestamp: now,
            severity,
        };
        self.entries.insert(0, message);
        &self.entries[0]
    }

    pub fn system(&mut self, severity: Severity, text: impl Into<String>, now: DateTime<Utc>) {
        self.post(Sender::System, severity, text, now);
    }

    pub fn latest(&self) -> Option<&AdvisorMessage> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdvisorMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_saved(&self) -> Vec<SavedMessage> {
        self.entries.iter().map(SavedMessage::from).collect()
    }
}
