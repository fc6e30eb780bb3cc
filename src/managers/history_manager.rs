//! History Manager for Sitewright.
//!
//! Implements `HistoryManagerTrait`: a newest-first log of generated
//! websites, kept as one JSON array inside a named storage slot.
//!
//! Every operation re-reads the slot, so the first read initializes the
//! store lazily and an external writer's last save is always what we see.

use chrono::{Local, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::database::SlotStorage;
use crate::types::artifact::Artifact;
use crate::types::errors::HistoryError;
use crate::types::history::{HistoryRecord, HistoryUpdate};

/// Slot holding the serialized history list.
pub const HISTORY_SLOT: &str = "sitewright-history";

/// Default length used when shortening prompts for list views.
pub const PROMPT_PREVIEW_LEN: usize = 50;

/// Trait defining history store operations.
pub trait HistoryManagerTrait {
    fn append(&mut self, prompt: &str, code: Artifact) -> Result<HistoryRecord, HistoryError>;
    fn list(&self) -> Vec<HistoryRecord>;
    fn get_by_id(&self, id: &str) -> Option<HistoryRecord>;
    fn update(&mut self, id: &str, update: HistoryUpdate) -> Result<Option<HistoryRecord>, HistoryError>;
    fn delete(&mut self, id: &str) -> Result<bool, HistoryError>;
    fn search(&self, query: &str) -> Vec<HistoryRecord>;
    fn clear(&mut self) -> Result<(), HistoryError>;
}

type Clock = Box<dyn Fn() -> i64>;

/// History store over any [`SlotStorage`].
pub struct HistoryManager {
    storage: Box<dyn SlotStorage>,
    clock: Clock,
}

impl HistoryManager {
    /// Creates a history store persisting into `storage`.
    pub fn new(storage: Box<dyn SlotStorage>) -> Self {
        Self {
            storage,
            clock: Box::new(Self::now_millis),
        }
    }

    /// Replaces the wall clock, e.g. with a fixed or stepping clock in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current UNIX time in milliseconds.
    pub fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Reads the record list for a write. A storage failure is returned so
    /// the caller never overwrites history it could not read; undecodable
    /// content still counts as empty.
    fn try_load(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        match self.storage.load_slot(HISTORY_SLOT)? {
            Some(raw) => Ok(Self::decode(&raw)),
            None => Ok(Vec::new()),
        }
    }

    /// Reads the record list for display. Any failure counts as empty.
    fn load(&self) -> Vec<HistoryRecord> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "history slot unreadable, treating as empty");
            Vec::new()
        })
    }

    fn decode(raw: &str) -> Vec<HistoryRecord> {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "history slot corrupt, treating as empty");
            Vec::new()
        })
    }

    fn save(&mut self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        let json = serde_json::to_string(records)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        self.storage.save_slot(HISTORY_SLOT, &json)
    }

    /// Timestamp-derived id, bumped one millisecond at a time past any id already taken.
    fn next_id(records: &[HistoryRecord], now: i64) -> String {
        let mut candidate = now;
        loop {
            let id = candidate.to_string();
            if !records.iter().any(|r| r.id == id) {
                return id;
            }
            candidate += 1;
        }
    }
}

impl HistoryManagerTrait for HistoryManager {
    /// Records a generation at the head of the list and persists the list.
    fn append(&mut self, prompt: &str, code: Artifact) -> Result<HistoryRecord, HistoryError> {
        if prompt.trim().is_empty() {
            return Err(HistoryError::EmptyPrompt);
        }

        let now = (self.clock)();
        let mut records = self.try_load()?;
        let record = HistoryRecord {
            id: Self::next_id(&records, now),
            prompt: prompt.to_string(),
            timestamp: now,
            code,
        };

        records.insert(0, record.clone());
        self.save(&records)?;
        tracing::debug!(id = %record.id, total = records.len(), "history record appended");
        Ok(record)
    }

    /// Lists all records, newest first.
    fn list(&self) -> Vec<HistoryRecord> {
        self.load()
    }

    fn get_by_id(&self, id: &str) -> Option<HistoryRecord> {
        self.load().into_iter().find(|r| r.id == id)
    }

    /// Merges the supplied fields, refreshes the timestamp and moves the
    /// record to the head. Returns `Ok(None)` when `id` is unknown.
    fn update(&mut self, id: &str, update: HistoryUpdate) -> Result<Option<HistoryRecord>, HistoryError> {
        if matches!(&update.prompt, Some(p) if p.trim().is_empty()) {
            return Err(HistoryError::EmptyPrompt);
        }

        let mut records = self.try_load()?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        let mut record = records.remove(index);
        if let Some(prompt) = update.prompt {
            record.prompt = prompt;
        }
        if let Some(html) = update.html {
            record.code.html = html;
        }
        if let Some(css) = update.css {
            record.code.css = css;
        }
        if let Some(js) = update.js {
            record.code.js = js;
        }
        record.timestamp = (self.clock)();

        records.insert(0, record.clone());
        self.save(&records)?;
        Ok(Some(record))
    }

    /// Removes the record with `id`. The filtered list is persisted either way.
    fn delete(&mut self, id: &str) -> Result<bool, HistoryError> {
        let records = self.try_load()?;
        let before = records.len();
        let remaining: Vec<HistoryRecord> = records.into_iter().filter(|r| r.id != id).collect();
        let removed = remaining.len() != before;

        self.save(&remaining)?;
        Ok(removed)
    }

    /// Case-insensitive substring match on the prompt.
    fn search(&self, query: &str) -> Vec<HistoryRecord> {
        let needle = query.trim().to_lowercase();
        let records = self.load();
        if needle.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|r| r.prompt.to_lowercase().contains(&needle))
            .collect()
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.save(&[])
    }
}

/// Shortens `text` to `max_len` characters, marking the cut with `...`.
pub fn truncate_prompt(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let head: String = text.chars().take(max_len).collect();
    format!("{}...", head)
}

/// Renders an epoch-millisecond timestamp in local time.
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
