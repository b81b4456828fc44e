// src/application/app.rs
use tracing::{debug, info};

use crate::application::{
    AutoGrow, Clock, CommitOutcome, InputController, LayoutEngine, NoteListView, NoteStore, Point,
    StorageAdapter, SystemClock,
};
use crate::domain::NoteId;

/// Card footer controls that are shown but have no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorativeAction {
    Reminder,
    Collaborator,
    Background,
    Image,
    Archive,
}

impl DecorativeAction {
    pub const ALL: [DecorativeAction; 5] = [
        DecorativeAction::Reminder,
        DecorativeAction::Collaborator,
        DecorativeAction::Background,
        DecorativeAction::Image,
        DecorativeAction::Archive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DecorativeAction::Reminder => "Add reminder",
            DecorativeAction::Collaborator => "Collaborator",
            DecorativeAction::Background => "Background options",
            DecorativeAction::Image => "Add image",
            DecorativeAction::Archive => "Archive",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DecorativeAction::Reminder => "bi-bell",
            DecorativeAction::Collaborator => "bi-person-plus",
            DecorativeAction::Background => "bi-palette",
            DecorativeAction::Image => "bi-image",
            DecorativeAction::Archive => "bi-archive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(Point),
    TitleInput(String),
    ContentInput(String),
    SearchInput(String),
    Cancel,
    Delete(NoteId),
    CardAction(NoteId, DecorativeAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// No listeners attached
    Ignored,
    Handled,
    Commit(CommitOutcome),
}

/// Top-level object wiring store, grid and form together.
///
/// Events only reach the components between `init` and `teardown`.
#[derive(Debug)]
pub struct App<S, L, G, C = SystemClock>
where
    S: StorageAdapter,
    L: LayoutEngine,
    G: AutoGrow,
    C: Clock,
{
    store: NoteStore<S>,
    view: NoteListView<L>,
    input: InputController<G, C>,
    attached: bool,
}

impl<S, L, G, C> App<S, L, G, C>
where
    S: StorageAdapter,
    L: LayoutEngine,
    G: AutoGrow,
    C: Clock,
{
    pub fn new(store: NoteStore<S>, view: NoteListView<L>, input: InputController<G, C>) -> Self {
        Self {
            store,
            view,
            input,
            attached: false,
        }
    }

    pub fn init(&mut self) {
        if self.attached {
            debug!("App already initialized");
            return;
        }
        self.input.attach_autogrow();
        let notes = self.store.load_all();
        self.input.observe_ids(&notes);
        self.view.render_all(&notes);
        self.attached = true;
        info!(notes = notes.len(), "App initialized");
    }

    pub fn teardown(&mut self) {
        if self.attached {
            self.attached = false;
            info!("App torn down");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        if !self.attached {
            debug!(?event, "Event ignored, listeners detached");
            return EventOutcome::Ignored;
        }

        match event {
            UiEvent::Click(point) => {
                match self
                    .input
                    .on_document_click(point, &mut self.store, &mut self.view)
                {
                    Some(outcome) => EventOutcome::Commit(outcome),
                    None => EventOutcome::Handled,
                }
            }
            UiEvent::TitleInput(value) => {
                self.input.set_title(value);
                EventOutcome::Handled
            }
            UiEvent::ContentInput(value) => {
                self.input.set_content(value);
                EventOutcome::Handled
            }
            UiEvent::SearchInput(value) => {
                self.input.on_search_input(&value, &mut self.view);
                EventOutcome::Handled
            }
            UiEvent::Cancel => {
                self.input.reset();
                EventOutcome::Handled
            }
            UiEvent::Delete(id) => {
                self.view.handle_delete(&mut self.store, id);
                EventOutcome::Handled
            }
            UiEvent::CardAction(id, action) => {
                debug!(note_id = id, ?action, "Decorative control, no action");
                EventOutcome::Handled
            }
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn view(&self) -> &NoteListView<L> {
        &self.view
    }

    pub fn input(&self) -> &InputController<G, C> {
        &self.input
    }
}
