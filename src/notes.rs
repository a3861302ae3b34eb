//! Rendering of free-text route notes.

use pulldown_cmark::{html, Options, Parser};

/// Turns route notes into the form shown in documentation UIs.
pub trait NotesRenderer {
    fn render(&self, notes: &str) -> String;
}

/// Renders notes as CommonMark into HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl NotesRenderer for MarkdownRenderer {
    fn render(&self, notes: &str) -> String {
        let parser = Parser::new_ext(notes, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
        let mut output = String::with_capacity(notes.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

/// Remove the common leading indentation of a heredoc-style string.
///
/// The indent is the shortest run of leading spaces/tabs over all lines that contain
/// something besides whitespace. Exactly that many leading spaces/tabs are removed from every
/// line that has them; lines with a shorter run are left alone.
pub fn strip_heredoc(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| {
            line.trim_start_matches([' ', '\t'])
                .chars()
                .next()
                .is_some_and(|c| !c.is_whitespace())
        })
        .map(leading_indent)
        .min()
        .unwrap_or(0);

    if indent == 0 {
        return text.to_string();
    }

    text.split_inclusive('\n')
        .map(|line| {
            if leading_indent(line) >= indent {
                &line[indent..]
            } else {
                line
            }
        })
        .collect()
}

fn leading_indent(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}
