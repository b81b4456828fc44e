// src/application/mod.rs
pub mod app;
pub mod id_generator;
pub mod input_controller;
pub mod layout;
pub mod note_list_view;
pub mod note_store;
pub mod storage;

pub use app::{App, DecorativeAction, EventOutcome, UiEvent};
pub use id_generator::{Clock, NoteIdGenerator, SystemClock};
pub use input_controller::{CommitOutcome, EntryState, FormBounds, InputController, Point};
pub use layout::{AutoGrow, LayoutConfig, LayoutEngine, Placement, TextField};
pub use note_list_view::{filter_cards, NoteCard, NoteListView};
pub use note_store::{decode_collection, encode_collection, DecodedCollection, NoteStore};
pub use storage::{StorageAdapter, StorageError};
