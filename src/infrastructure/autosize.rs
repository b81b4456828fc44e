// src/infrastructure/autosize.rs
use std::collections::BTreeSet;

use tracing::trace;

use crate::application::{AutoGrow, TextField};

/// Sizes a field to its line count, clamped to `[min_rows, max_rows]`.
/// `max_rows == 0` means no upper bound.
#[derive(Debug, Clone, Default)]
pub struct LineAutoGrow {
    min_rows: usize,
    max_rows: usize,
    attached: BTreeSet<String>,
}

impl LineAutoGrow {
    pub fn new(min_rows: usize, max_rows: usize) -> Self {
        Self {
            min_rows: min_rows.max(1),
            max_rows,
            attached: BTreeSet::new(),
        }
    }

    pub fn rows_for(&self, value: &str) -> usize {
        // a trailing newline still opens a new visible row
        let lines = value.split('\n').count();
        let rows = lines.max(self.min_rows);
        if self.max_rows > 0 {
            rows.min(self.max_rows.max(self.min_rows))
        } else {
            rows
        }
    }

    fn resize(&self, field: &mut TextField) {
        field.rows = self.rows_for(&field.value);
        trace!(field = %field.name, rows = field.rows, "Resized");
    }
}

impl AutoGrow for LineAutoGrow {
    fn attach(&mut self, fields: &mut [&mut TextField]) {
        for field in fields.iter_mut() {
            self.attached.insert(field.name.clone());
            self.resize(field);
        }
    }

    fn update(&mut self, fields: &mut [&mut TextField]) {
        for field in fields.iter_mut() {
            if self.attached.contains(&field.name) {
                self.resize(field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 1)]
    #[case("one line", 1)]
    #[case("a\nb\nc", 3)]
    #[case("a\n", 2)]
    #[case("1\n2\n3\n4\n5\n6\n7", 5)]
    fn given_text_when_sizing_then_rows_follow_lines(#[case] value: &str, #[case] rows: usize) {
        let grow = LineAutoGrow::new(1, 5);

        assert_eq!(grow.rows_for(value), rows);
    }

    #[test]
    fn given_cleared_field_when_updating_then_collapses_to_min_rows() {
        let mut grow = LineAutoGrow::new(2, 0);
        let mut field = TextField::new("noteContent");
        field.value = "a\nb\nc\nd".to_string();
        grow.attach(&mut [&mut field]);
        assert_eq!(field.rows, 4);

        field.value.clear();
        grow.update(&mut [&mut field]);

        assert_eq!(field.rows, 2);
    }

    #[test]
    fn given_attached_field_when_typing_newlines_then_grows_per_keystroke() {
        let mut grow = LineAutoGrow::new(1, 0);
        let mut field = TextField::new("noteContent");
        grow.attach(&mut [&mut field]);

        field.value = "one\n".to_string();
        grow.on_input(&mut field);
        let after_first = field.rows;
        field.value = "one\ntwo\nthree".to_string();
        grow.on_input(&mut field);

        assert_eq!(after_first, 2);
        assert_eq!(field.rows, 3);
    }

    #[test]
    fn given_unattached_field_when_updating_then_left_alone() {
        let mut grow = LineAutoGrow::new(1, 0);
        let mut field = TextField::new("search");
        field.value = "a\nb".to_string();

        grow.update(&mut [&mut field]);

        assert_eq!(field.rows, 1);
    }
}
