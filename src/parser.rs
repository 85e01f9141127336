use std::sync::OnceLock;

use regex::Regex;

use crate::block::{Block, Span};

/// Line kinds recognised by the formatter, in match priority order.
enum Line<'a> {
    Heading(u8, &'a str),
    Bullet(&'a str),
    Label(&'a str),
    Text(&'a str),
    Blank,
}

fn classify(line: &str) -> Line<'_> {
    if let Some(rest) = line.strip_prefix("# ") {
        Line::Heading(1, rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        Line::Heading(2, rest)
    } else if let Some(rest) = line.strip_prefix("### ") {
        Line::Heading(3, rest)
    } else if let Some(rest) = line.strip_prefix("- ") {
        Line::Bullet(rest)
    } else if line.starts_with("**") && line.ends_with(":**") {
        Line::Label(line)
    } else if !line.trim().is_empty() {
        Line::Text(line)
    } else {
        Line::Blank
    }
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    // Items of the list group currently open, if any
    list: Option<Vec<Vec<Span>>>,
}

impl ParseState {
    fn close_list(&mut self) {
        if let Some(items) = self.list.take() {
            self.blocks.push(Block::ListGroup { items });
        }
    }

    fn process_line(&mut self, line: &str) {
        match classify(line) {
            Line::Bullet(content) => {
                self.list
                    .get_or_insert_with(Vec::new)
                    .push(format_inline(content));
            }
            Line::Heading(level, text) => {
                self.close_list();
                self.blocks.push(Block::Heading {
                    level,
                    text: text.to_string(),
                });
            }
            Line::Label(line) => {
                self.close_list();
                self.blocks.push(Block::LabeledParagraph {
                    text: line.replace("**", ""),
                });
            }
            Line::Text(line) => {
                self.close_list();
                self.blocks.push(Block::Paragraph {
                    spans: format_inline(line),
                });
            }
            Line::Blank => self.close_list(),
        }
    }
}

/// Format report text into a list of blocks.
///
/// Total over all inputs: unrecognised markup falls through to a paragraph
/// or literal text.
pub fn format(text: &str) -> Vec<Block> {
    let mut state = ParseState::default();

    for line in text.lines() {
        state.process_line(line);
    }

    state.close_list();
    state.blocks
}

/// Split a line into plain and bold spans.
///
/// Every `**…**` run (shortest match first, no `\r` inside) becomes a bold
/// span; everything around it stays plain, empty strings included, so the
/// result always starts and ends with a plain span.
pub fn format_inline(content: &str) -> Vec<Span> {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    let bold_regex = BOLD_REGEX
        .get_or_init(|| Regex::new(r"\*\*[^\r\n]*?\*\*").expect("Invalid bold regex"));

    let mut spans = Vec::new();
    let mut pos = 0;

    for m in bold_regex.find_iter(content) {
        spans.push(Span::Plain(content[pos..m.start()].to_string()));
        spans.push(Span::Bold(content[m.start() + 2..m.end() - 2].to_string()));
        pos = m.end();
    }
    spans.push(Span::Plain(content[pos..].to_string()));

    spans
}
