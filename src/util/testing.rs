// src/util/testing.rs

use anyhow::Result;
use std::cell::Cell;
use std::collections::HashMap;
use std::env;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{
    AutoGrow, Clock, LayoutConfig, LayoutEngine, NoteCard, StorageAdapter, StorageError,
    TextField,
};
use crate::domain::NoteId;

/// In-memory storage with switchable failures, for tests that exercise
/// `NoteStore` without touching disk.
///
/// # Examples
///
/// ```
/// use notegrid::application::StorageAdapter;
/// use notegrid::util::testing::MockStorage;
///
/// let storage = MockStorage::builder()
///     .with_value("notes", "[]")
///     .build();
/// assert_eq!(storage.get_item("notes").unwrap().as_deref(), Some("[]"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MockStorage {
    pub fn builder() -> MockStorageBuilder {
        MockStorageBuilder::new()
    }

    /// Number of successful `set_item` calls
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl StorageAdapter for MockStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Read {
                key: key.to_string(),
                reason: "simulated read failure".to_string(),
            });
        }
        Ok(self.values.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "simulated quota exceeded".to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Builder for MockStorage
pub struct MockStorageBuilder {
    storage: MockStorage,
}

impl MockStorageBuilder {
    pub fn new() -> Self {
        Self {
            storage: MockStorage::default(),
        }
    }

    /// Pre-populate a key
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.storage
            .values
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_read_failure(mut self) -> Self {
        self.storage.fail_reads = true;
        self
    }

    pub fn with_write_failure(mut self) -> Self {
        self.storage.fail_writes = true;
        self
    }

    pub fn build(self) -> MockStorage {
        self.storage
    }
}

impl Default for MockStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout engine that only records what it was asked to lay out.
#[derive(Debug, Default)]
pub struct RecordingLayout {
    passes: usize,
    last_visible: Vec<NoteId>,
    last_config: Option<LayoutConfig>,
}

impl RecordingLayout {
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Ids of the visible cards in the last pass, in order
    pub fn last_visible(&self) -> &[NoteId] {
        &self.last_visible
    }

    pub fn last_config(&self) -> Option<&LayoutConfig> {
        self.last_config.as_ref()
    }
}

impl LayoutEngine for RecordingLayout {
    fn layout(&mut self, config: &LayoutConfig, cards: &[NoteCard]) {
        self.passes += 1;
        self.last_visible = cards.iter().filter(|c| c.visible).map(|c| c.id).collect();
        self.last_config = Some(config.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingAutoGrow {
    attached: Vec<String>,
    updates: usize,
    inputs: Vec<String>,
}

impl RecordingAutoGrow {
    pub fn attached(&self) -> &[String] {
        &self.attached
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Names of the fields resized on typing, in call order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }
}

impl AutoGrow for RecordingAutoGrow {
    fn attach(&mut self, fields: &mut [&mut TextField]) {
        self.attached
            .extend(fields.iter().map(|f| f.name.clone()));
    }

    fn update(&mut self, _fields: &mut [&mut TextField]) {
        self.updates += 1;
    }

    fn on_input(&mut self, field: &mut TextField) {
        self.inputs.push(field.name.clone());
    }
}

/// Manually driven clock; clones share the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<i64>>,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
