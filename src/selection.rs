//! Host selection state and the scoped guard used by the copy sequence.
//!
//! `Selection` is the single current selection of a page: zero or more
//! ranges, each pointing into one element's text content by character
//! offsets. The copier never holds on to it; it claims the selection through
//! a `SelectionGuard`, which clears every range again when dropped.

use std::ops::Deref;

use crate::document::{Document, Element};

/// A span of one element's text content, in characters (end-exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    pub element: String,
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(element: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            element: element.into(),
            start,
            end,
        }
    }

    /// Range covering the whole text content of `element`.
    pub fn select_node(element: &Element) -> Self {
        let len = element.text_content().chars().count();
        Self::new(element.id(), 0, len)
    }

    /// Return the range with `start <= end`.
    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                element: self.element,
                start: self.end,
                end: self.start,
            }
        }
    }

    /// True when the range spans at least one character.
    pub fn is_non_empty(&self) -> bool {
        self.start != self.end
    }

    /// Text covered by this range, or `None` when the element no longer
    /// exists in `document`.
    pub fn text(&self, document: &Document) -> Option<String> {
        let range = self.clone().normalized();
        let element = document.get_element_by_id(&range.element)?;
        Some(
            element
                .text_content()
                .chars()
                .skip(range.start)
                .take(range.end - range.start)
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_range(&mut self, range: SelectionRange) {
        self.ranges.push(range);
    }

    pub fn remove_all_ranges(&mut self) {
        self.ranges.clear();
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Concatenated text of every range, in insertion order. Ranges whose
    /// element is missing contribute nothing.
    pub fn to_text(&self, document: &Document) -> String {
        self.ranges
            .iter()
            .filter_map(|range| range.text(document))
            .collect()
    }
}

/// Exclusive claim on a `Selection` for the lifetime of the guard.
///
/// Acquiring clears any existing ranges before adding the new one; dropping
/// the guard clears the selection, including on unwind.
#[derive(Debug)]
pub struct SelectionGuard<'a> {
    selection: &'a mut Selection,
}

impl<'a> SelectionGuard<'a> {
    pub fn acquire(selection: &'a mut Selection, range: SelectionRange) -> Self {
        selection.remove_all_ranges();
        selection.add_range(range);
        Self { selection }
    }
}

impl Deref for SelectionGuard<'_> {
    type Target = Selection;

    fn deref(&self) -> &Selection {
        self.selection
    }
}

impl Drop for SelectionGuard<'_> {
    fn drop(&mut self) {
        self.selection.remove_all_ranges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;

    fn doc() -> Document {
        Document::new(vec![
            Element::new("field", ElementKind::CodeBlock { lang: None }, "secret-token"),
            Element::new("other", ElementKind::Paragraph, "unrelated"),
        ])
    }

    #[test]
    fn normalized_swaps_when_needed() {
        let range = SelectionRange::new("field", 5, 2).normalized();
        assert_eq!((range.start, range.end), (2, 5));
        assert!(range.is_non_empty());
    }

    #[test]
    fn select_node_spans_whole_content() {
        let doc = doc();
        let element = doc.get_element_by_id("field").unwrap();
        let range = SelectionRange::select_node(element);
        assert_eq!(range.end, "secret-token".len());
        assert_eq!(range.text(&doc).as_deref(), Some("secret-token"));
    }

    #[test]
    fn partial_range_uses_char_offsets() {
        let doc = Document::new(vec![Element::new("u", ElementKind::Paragraph, "héllo")]);
        let range = SelectionRange::new("u", 1, 3);
        assert_eq!(range.text(&doc).as_deref(), Some("él"));
    }

    #[test]
    fn guard_replaces_existing_ranges_and_clears_on_drop() {
        let doc = doc();
        let mut selection = Selection::new();
        selection.add_range(SelectionRange::new("other", 0, 3));
        {
            let guard = SelectionGuard::acquire(&mut selection, SelectionRange::new("field", 0, 6));
            assert_eq!(guard.range_count(), 1);
            assert_eq!(guard.to_text(&doc), "secret");
        }
        assert!(selection.is_empty());
    }

    #[test]
    fn guard_clears_on_unwind() {
        let mut selection = Selection::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = SelectionGuard::acquire(&mut selection, SelectionRange::new("field", 0, 1));
            panic!("backend blew up");
        }));
        assert!(result.is_err());
        assert!(selection.is_empty());
    }

    #[test]
    fn missing_element_contributes_nothing() {
        let doc = doc();
        let mut selection = Selection::new();
        selection.add_range(SelectionRange::new("gone", 0, 4));
        assert_eq!(selection.to_text(&doc), "");
    }
}
