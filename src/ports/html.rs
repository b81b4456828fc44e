// src/ports/html.rs
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

use crate::application::{DecorativeAction, LayoutEngine, NoteCard, NoteListView, TextField};

/// Renders the note board as a standalone HTML page.
#[derive(Debug)]
pub struct HtmlPresenter {
    title: String,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self {
            title: "Notes".to_string(),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// One grid item. Note text is always escaped.
    pub fn render_card(&self, card: &NoteCard, style: &str) -> String {
        let mut footer = String::new();
        for action in DecorativeAction::ALL {
            footer.push_str(&format!(
                r#"<button class="btn btn-sm btn-outline-light border-0 rounded-5 opacity-75 me-1" title="{label}"><i class="bi {icon}"></i></button>"#,
                label = action.label(),
                icon = action.icon(),
            ));
        }
        format!(
            r#"<div class="col" data-note-id="{id}" style="{style}">
    <article class="card rounded-3 custom-bg border-light border-opacity-50">
        <div class="card-body user-select-none">
            <h5 class="card-title text-light mb-3">{title}</h5>
            <p class="card-text text-light">{content}</p>
        </div>
        <div class="card-footer border-top-0 d-lg-flex justify-content-lg-between align-items-center">
            {footer}<button class="btn btn-sm btn-outline-light border-0 rounded-5 opacity-75 me-1 delete-note" title="Delete" data-note-id="{id}"><i class="bi bi-trash3"></i></button>
        </div>
    </article>
</div>"#,
            id = card.id,
            style = encode_double_quoted_attribute(style),
            title = encode_text(&card.title),
            content = encode_text(&card.content),
            footer = footer,
        )
    }

    fn card_style<L: LayoutEngine>(&self, view: &NoteListView<L>, card: &NoteCard) -> String {
        if !card.visible {
            return "display: none".to_string();
        }
        let columns = view.config().columns.max(1);
        let width = 100.0 / columns as f32;
        match view.layout_engine().placement(card.id) {
            Some(p) if view.config().percent_position => format!(
                "position: absolute; left: {:.4}%; top: {}px; width: {:.4}%",
                p.left, p.top, width
            ),
            Some(p) => format!(
                "position: absolute; left: calc({} * {:.4}%); top: {}px; width: {:.4}%",
                p.left, width, p.top, width
            ),
            None => String::new(),
        }
    }

    fn render_field(field: &TextField, placeholder: &str) -> String {
        format!(
            r#"<textarea id="{name}" class="form-control" rows="{rows}" placeholder="{placeholder}">{value}</textarea>"#,
            name = encode_double_quoted_attribute(&field.name),
            rows = field.rows,
            placeholder = placeholder,
            value = encode_text(&field.value),
        )
    }

    #[instrument(level = "debug", skip_all, fields(cards = view.cards().len()))]
    pub fn render<L: LayoutEngine>(
        &self,
        view: &NoteListView<L>,
        title_field: &TextField,
        content_field: &TextField,
        search: &str,
    ) -> String {
        let cards: Vec<String> = view
            .cards()
            .iter()
            .map(|card| self.render_card(card, &self.card_style(view, card)))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{page_title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background-color: #202124;
            color: #e8eaed;
            margin: 0;
            padding: 1rem;
        }}
        #noteForm {{
            max-width: 600px;
            margin: 0 auto 2rem;
        }}
        #noteForm textarea, input[type="search"] {{
            width: 100%;
            resize: none;
            box-sizing: border-box;
        }}
        #notesContainer {{
            position: relative;
        }}
        .col {{
            box-sizing: border-box;
            padding: 0.5rem;
        }}
        .card {{
            border: 1px solid #5f6368;
            border-radius: 8px;
        }}
        .card-text {{
            font-size: 0.875rem;
            white-space: pre-wrap;
        }}
    </style>
</head>
<body>
    <input type="search" placeholder="Search" value="{search}">
    <form id="noteForm">
        {title_field}
        {content_field}
        <button type="button" id="undoButton">Undo</button>
        <button type="button" id="redoButton">Redo</button>
        <button type="button" id="cancelButton">Close</button>
    </form>
    <div id="notesContainer" class="row" style="min-height: {height}px" data-item-selector="{item_selector}" data-column-width="{column_width}">
{cards}
    </div>
</body>
</html>"#,
            page_title = encode_text(&self.title),
            search = encode_double_quoted_attribute(search),
            title_field = Self::render_field(title_field, "Title"),
            content_field = Self::render_field(content_field, "Take a note..."),
            height = container_height(view),
            item_selector = encode_double_quoted_attribute(&view.config().item_selector),
            column_width = encode_double_quoted_attribute(&view.config().column_width),
            cards = cards.join("\n"),
        )
    }
}

impl Default for HtmlPresenter {
    fn default() -> Self {
        Self::new()
    }
}

fn container_height<L: LayoutEngine>(view: &NoteListView<L>) -> u32 {
    view.visible_cards()
        .filter_map(|c| view.layout_engine().placement(c.id))
        .map(|p| p.top.saturating_add(p.height))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{LayoutConfig, Placement};
    use crate::domain::{Note, NoteId};
    use crate::infrastructure::MasonryLayout;

    fn board(notes: &[Note]) -> NoteListView<MasonryLayout> {
        let mut view = NoteListView::new(MasonryLayout::new(), LayoutConfig::default());
        view.render_all(notes);
        view
    }

    fn render(view: &NoteListView<MasonryLayout>) -> String {
        HtmlPresenter::new().render(
            view,
            &TextField::new("noteTitle"),
            &TextField::new("noteContent"),
            view.query(),
        )
    }

    #[test]
    fn given_markup_in_note_when_rendering_then_escapes_it() {
        let view = board(&[Note::new(1, "<b>bold</b>", "a & b <script>").unwrap()]);

        let html = render(&view);

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("a &amp; b &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn given_card_when_rendering_then_has_delete_and_inert_controls() {
        let view = board(&[Note::new(42, "T", "C").unwrap()]);

        let html = render(&view);

        assert!(html.contains(r#"delete-note" title="Delete" data-note-id="42""#));
        for action in DecorativeAction::ALL {
            assert!(html.contains(&format!(r#"title="{}""#, action.label())));
        }
    }

    #[test]
    fn given_filtered_view_when_rendering_then_hidden_cards_not_displayed() {
        let mut view = board(&[
            Note::new(1, "A", "x").unwrap(),
            Note::new(2, "B", "y").unwrap(),
        ]);
        view.apply_filter("x");

        let html = render(&view);

        assert!(html.contains(r#"data-note-id="2" style="display: none""#));
        assert!(html.contains(r#"data-note-id="1" style="position: absolute; left: 0.0000%; top: 0px"#));
    }

    #[test]
    fn given_empty_board_when_rendering_then_page_still_has_form_and_search() {
        let view = board(&[]);

        let html = render(&view);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="noteForm""#));
        assert!(html.contains(r#"type="search""#));
        assert!(html.contains(r#"data-item-selector=".col""#));
    }

    /// Puts every card at the very bottom of a near-full coordinate range.
    #[derive(Debug, Default)]
    struct FarDownLayout;

    impl LayoutEngine for FarDownLayout {
        fn layout(&mut self, _config: &LayoutConfig, _cards: &[NoteCard]) {}

        fn placement(&self, _id: NoteId) -> Option<Placement> {
            Some(Placement {
                column: 0,
                left: 0.0,
                top: u32::MAX - 10,
                height: 500,
            })
        }
    }

    #[test]
    fn given_card_near_coordinate_limit_when_rendering_then_height_pins_at_max() {
        let mut view = NoteListView::new(FarDownLayout, LayoutConfig::default());
        view.render_all(&[Note::new(1, "A", "x").unwrap()]);

        let html = HtmlPresenter::new().render(
            &view,
            &TextField::new("noteTitle"),
            &TextField::new("noteContent"),
            "",
        );

        assert!(html.contains(&format!("min-height: {}px", u32::MAX)));
    }
}
