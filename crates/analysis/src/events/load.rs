use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::record::{Event, Row};

/// Errors that can occur when loading an event log.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open data file")]
    Io(#[from] std::io::Error),

    #[error("malformed event row: {0}")]
    Csv(#[from] csv::Error),
}

/// User events in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Loads an event log from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if `path` does not exist, otherwise
    /// the errors of [`EventLog::from_reader`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let log = Self::from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), events = log.len(), "loaded event log");
        Ok(log)
    }

    /// Reads an event log from CSV data with a header row.
    ///
    /// Timestamps that cannot be parsed are kept as missing and logged.
    /// Influence cells that are not numbers, such as `N/A`, are missing too.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Csv`] if a row is malformed or lacks `user_id`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut events = Vec::new();
        for (row_number, row) in reader.deserialize::<Row>().enumerate() {
            let row = row?;
            let event = Event::from_row(row);
            if event.time.is_none() {
                tracing::warn!(row = row_number, "unparseable event_time");
            }
            events.push(event);
        }

        Ok(Self { events })
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}
