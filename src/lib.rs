// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::Path;

use anyhow::{bail, Result};
use application::{
    App, CommitOutcome, EventOutcome, FormBounds, InputController, NoteListView, NoteStore, Point,
    UiEvent,
};
use constants::{FORM_HEIGHT, FORM_WIDTH, FORM_X, FORM_Y, PREVIEW_CHARS};
use domain::{Note, NoteId};
use infrastructure::{BoardRenderer, Config, FileStorage, LineAutoGrow, MasonryLayout};
use ports::HtmlPresenter;
use tracing::{debug, info};

use crate::cli::args::{Args, Command};

/// The application as the binary runs it: file-backed, masonry grid.
pub type Board = App<FileStorage, MasonryLayout, LineAutoGrow>;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notegrid with arguments");

    let config = Config::resolve(args.config.as_deref())?;
    let store_dir = match args.store_dir {
        Some(dir) => dir,
        None => config.storage_dir()?,
    };
    debug!(?store_dir, "Using note store");

    let mut board = open_board(&config, &store_dir);
    board.init();

    let result = match args.command {
        Command::Add { title, content } => add_note(&mut board, title, content),
        Command::List { search, json } => list_notes(&mut board, search, json),
        Command::Delete { note_id } => delete_note(&mut board, note_id),
        Command::Show { search, output } => show_board(&mut board, search, output.as_deref()),
    };

    board.teardown();
    result
}

pub fn open_board(config: &Config, store_dir: &Path) -> Board {
    let store = NoteStore::with_key(FileStorage::new(store_dir), config.storage.key.clone());
    let view = NoteListView::new(MasonryLayout::new(), config.layout.clone());
    let input = InputController::new(
        FormBounds::new(FORM_X, FORM_Y, FORM_WIDTH, FORM_HEIGHT),
        LineAutoGrow::new(config.autosize.min_rows, config.autosize.max_rows),
    );
    App::new(store, view, input)
}

/// A click position guaranteed to land outside the entry form.
pub fn outside_form(bounds: FormBounds) -> Point {
    Point::new(bounds.x + bounds.width + 1.0, bounds.y + bounds.height + 1.0)
}

fn add_note(board: &mut Board, title: String, content: String) -> Result<()> {
    board.dispatch(UiEvent::TitleInput(title));
    board.dispatch(UiEvent::ContentInput(content));

    let click = outside_form(board.input().bounds());
    match board.dispatch(UiEvent::Click(click)) {
        EventOutcome::Commit(CommitOutcome::Saved(note)) => {
            info!(note_id = note.id, "Added note");
            println!("{}", note.id);
            Ok(())
        }
        EventOutcome::Commit(CommitOutcome::Blank) => {
            println!("Nothing saved: title and content are both empty");
            Ok(())
        }
        EventOutcome::Commit(CommitOutcome::Failed) => bail!("Note could not be saved"),
        other => bail!("Unexpected outcome for outside click: {other:?}"),
    }
}

fn list_notes(board: &mut Board, search: Option<String>, json: bool) -> Result<()> {
    if let Some(query) = search {
        board.dispatch(UiEvent::SearchInput(query));
    }

    let visible: Vec<Note> = board
        .view()
        .visible_cards()
        .map(|c| Note {
            id: c.id,
            title: c.title.clone(),
            content: c.content.clone(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    for note in &visible {
        println!(
            "{}\t{}\t{}",
            note.id,
            util::text::preview(&note.title, PREVIEW_CHARS),
            util::text::preview(&note.content, PREVIEW_CHARS)
        );
    }
    Ok(())
}

fn delete_note(board: &mut Board, note_id: NoteId) -> Result<()> {
    let present = board.view().cards().iter().any(|c| c.id == note_id);
    board.dispatch(UiEvent::Delete(note_id));

    let gone = !board.view().cards().iter().any(|c| c.id == note_id);
    match (present, gone) {
        (true, true) => println!("Deleted note {note_id}"),
        (false, _) => println!("No note with id {note_id}"),
        (true, false) => bail!("Note {note_id} could not be deleted"),
    }
    Ok(())
}

fn show_board(board: &mut Board, search: Option<String>, output: Option<&Path>) -> Result<()> {
    if let Some(query) = search {
        board.dispatch(UiEvent::SearchInput(query));
    }

    let input = board.input();
    let html = HtmlPresenter::new().render(
        board.view(),
        input.title(),
        input.content(),
        input.search(),
    );

    let mut renderer = BoardRenderer::new();
    match output {
        Some(path) => {
            renderer.write_to(path, &html)?;
            println!("{}", path.display());
        }
        None => {
            let path = renderer.create_temp_file(&html)?;
            renderer.open_in_browser(&path)?;
        }
    }
    Ok(())
}
