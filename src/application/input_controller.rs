// src/application/input_controller.rs
use tracing::{debug, info, instrument, warn};

use crate::application::{
    AutoGrow, Clock, LayoutEngine, NoteIdGenerator, NoteListView, NoteStore, StorageAdapter,
    SystemClock, TextField,
};
use crate::domain::{Note, NoteDraft, NoteId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle occupied by the note entry form.
///
/// Left and top edges belong to the form, right and bottom edges do not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FormBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Idle,
    Editing,
    Committing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Saved(Note),
    /// Both fields were blank, nothing happened.
    Blank,
    /// The store did not accept the note; the form keeps its text.
    Failed,
}

/// Note entry form plus the search box.
#[derive(Debug)]
pub struct InputController<G: AutoGrow, C: Clock = SystemClock> {
    title: TextField,
    content: TextField,
    search: String,
    bounds: FormBounds,
    state: EntryState,
    autogrow: G,
    ids: NoteIdGenerator<C>,
}

impl<G: AutoGrow> InputController<G, SystemClock> {
    pub fn new(bounds: FormBounds, autogrow: G) -> Self {
        Self::with_clock(bounds, autogrow, SystemClock)
    }
}

impl<G: AutoGrow, C: Clock> InputController<G, C> {
    pub fn with_clock(bounds: FormBounds, autogrow: G, clock: C) -> Self {
        Self {
            title: TextField::new("noteTitle"),
            content: TextField::new("noteContent"),
            search: String::new(),
            bounds,
            state: EntryState::Idle,
            autogrow,
            ids: NoteIdGenerator::new(clock),
        }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn bounds(&self) -> FormBounds {
        self.bounds
    }

    pub fn title(&self) -> &TextField {
        &self.title
    }

    pub fn content(&self) -> &TextField {
        &self.content
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn autogrow(&self) -> &G {
        &self.autogrow
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft::new(self.title.value.clone(), self.content.value.clone())
    }

    /// Hook the form fields up to auto-grow sizing.
    pub fn attach_autogrow(&mut self) {
        self.autogrow
            .attach(&mut [&mut self.title, &mut self.content]);
    }

    /// Ensure generated ids stay ahead of ids already in use.
    pub fn observe_ids(&mut self, notes: &[Note]) {
        if let Some(max) = notes.iter().map(|n| n.id).max() {
            self.ids.observe(max);
        }
    }

    /// Title typing. The field resizes to its new text.
    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title.value = value.into();
        self.autogrow.on_input(&mut self.title);
        self.refresh_editing();
    }

    pub fn set_content(&mut self, value: impl Into<String>) {
        self.content.value = value.into();
        self.autogrow.on_input(&mut self.content);
        self.refresh_editing();
    }

    /// Document-wide click. Outside the form it attempts a commit.
    ///
    /// Returns `None` for clicks inside the form.
    pub fn on_document_click<S: StorageAdapter, L: LayoutEngine>(
        &mut self,
        point: Point,
        store: &mut NoteStore<S>,
        view: &mut NoteListView<L>,
    ) -> Option<CommitOutcome> {
        if self.bounds.contains(point) {
            debug!(?point, "Click inside form");
            return None;
        }
        Some(self.commit(store, view))
    }

    #[instrument(level = "debug", skip_all)]
    pub fn commit<S: StorageAdapter, L: LayoutEngine>(
        &mut self,
        store: &mut NoteStore<S>,
        view: &mut NoteListView<L>,
    ) -> CommitOutcome {
        let draft = self.draft();
        if draft.is_blank() {
            self.refresh_editing();
            return CommitOutcome::Blank;
        }

        self.state = EntryState::Committing;
        let id: NoteId = self.ids.next_id();
        let note = match draft.to_note(id) {
            Ok(note) => note,
            Err(e) => {
                warn!(error = %e, "Draft rejected");
                self.state = EntryState::Editing;
                return CommitOutcome::Failed;
            }
        };

        if !store.append(note.clone()) {
            self.state = EntryState::Editing;
            return CommitOutcome::Failed;
        }

        view.append_one(&note);
        self.reset();
        info!(note_id = note.id, "Committed note");
        CommitOutcome::Saved(note)
    }

    /// Cancel control: empty both fields and shrink them back.
    pub fn reset(&mut self) {
        self.title.value.clear();
        self.content.value.clear();
        self.autogrow
            .update(&mut [&mut self.title, &mut self.content]);
        self.state = EntryState::Idle;
    }

    /// Search box input, applied on every keystroke.
    pub fn on_search_input<L: LayoutEngine>(&mut self, value: &str, view: &mut NoteListView<L>) {
        self.search = value.to_string();
        view.apply_filter(value);
    }

    fn refresh_editing(&mut self) {
        self.state = if self.draft().has_text() {
            EntryState::Editing
        } else {
            EntryState::Idle
        };
    }
}
