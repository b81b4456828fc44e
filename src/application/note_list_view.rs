// src/application/note_list_view.rs
use tracing::{debug, instrument, trace};

use crate::application::{LayoutConfig, LayoutEngine, NoteStore, StorageAdapter};
use crate::domain::note::matches_query;
use crate::domain::{Note, NoteId};

/// Display model of one rendered note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub visible: bool,
}

impl NoteCard {
    pub fn matches(&self, query: &str) -> bool {
        matches_query(&self.title, &self.content, query)
    }
}

impl From<&Note> for NoteCard {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            visible: true,
        }
    }
}

/// Show every card matching `query`, hide the rest. Returns the visible count.
pub fn filter_cards(cards: &mut [NoteCard], query: &str) -> usize {
    cards.iter_mut().fold(0, |shown, card| {
        card.visible = card.matches(query);
        shown + usize::from(card.visible)
    })
}

/// The rendered grid of note cards.
///
/// Holds only what is displayed; the store stays the source of truth. Every
/// change to the card set or their visibility ends with one layout pass.
#[derive(Debug)]
pub struct NoteListView<L: LayoutEngine> {
    cards: Vec<NoteCard>,
    layout: L,
    config: LayoutConfig,
    query: String,
}

impl<L: LayoutEngine> NoteListView<L> {
    pub fn new(layout: L, config: LayoutConfig) -> Self {
        Self {
            cards: Vec::new(),
            layout,
            config,
            query: String::new(),
        }
    }

    pub fn cards(&self) -> &[NoteCard] {
        &self.cards
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &NoteCard> {
        self.cards.iter().filter(|c| c.visible)
    }

    /// Last query passed to `apply_filter`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout_engine(&self) -> &L {
        &self.layout
    }

    #[instrument(level = "debug", skip_all, fields(count = notes.len()))]
    pub fn render_all(&mut self, notes: &[Note]) {
        self.cards = notes.iter().map(NoteCard::from).collect();
        self.relayout();
    }

    pub fn append_one(&mut self, note: &Note) {
        debug!(note_id = note.id, "Appending card");
        self.cards.push(NoteCard::from(note));
        self.relayout();
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply_filter(&mut self, query: &str) {
        self.query = query.to_string();
        let shown = filter_cards(&mut self.cards, query);
        debug!(shown, total = self.cards.len(), "Filtered cards");
        self.relayout();
    }

    /// Delete control handler: remove from the store, then rebuild the whole
    /// grid from what the store now holds.
    #[instrument(level = "debug", skip(self, store))]
    pub fn handle_delete<S: StorageAdapter>(&mut self, store: &mut NoteStore<S>, id: NoteId) {
        store.remove(id);
        self.cards.clear();
        let notes = store.load_all();
        self.render_all(&notes);
    }

    fn relayout(&mut self) {
        trace!(cards = self.cards.len(), "Layout pass");
        self.layout.layout(&self.config, &self.cards);
    }
}
