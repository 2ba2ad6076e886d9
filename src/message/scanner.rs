//! Placeholder scanner for message templates

use super::types::{CLOSE_TAG, OPEN_TAG};

/// A placeholder span found in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Byte offset of the opening tag
    pub start: usize,
    /// Byte offset just past the closing tag
    pub end: usize,
    /// Text between the tags, verbatim
    pub name: &'a str,
}

impl<'a> Placeholder<'a> {
    /// The full span text, tags included
    pub fn span<'t>(&self, template: &'t str) -> &'t str {
        &template[self.start..self.end]
    }
}

/// Iterator over the placeholders of a template.
///
/// The first close tag after an open tag ends the span. An open tag followed
/// by another open tag before any close tag is literal text; scanning resumes
/// at the later one. An open tag that is never closed is literal text.
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    template: &'a str,
    pos: usize,
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.pos + self.template[self.pos..].find(OPEN_TAG)?;

        let close = match self.template[first + OPEN_TAG.len()..].find(CLOSE_TAG) {
            Some(offset) => first + OPEN_TAG.len() + offset,
            None => {
                self.pos = self.template.len();
                return None;
            }
        };

        // innermost open tag before the close tag
        let open = first + self.template[first..close].rfind(OPEN_TAG)?;
        let end = close + CLOSE_TAG.len();
        self.pos = end;

        Some(Placeholder {
            start: open,
            end,
            name: &self.template[open + OPEN_TAG.len()..close],
        })
    }
}

/// Scan a template for placeholders, left to right
pub fn scan(template: &str) -> Placeholders<'_> {
    Placeholders { template, pos: 0 }
}

/// Check if a string contains at least one placeholder
pub fn has_placeholders(template: &str) -> bool {
    scan(template).next().is_some()
}
