use crate::block::{Block, Span};
use crate::config::Config;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    if let Some(paper) = &config.page.paper {
        out.push_str(&format!("#set page(paper: {:?})\n", paper));
    }
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } if config.layout.heading_keep_with_next => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, &mut out);

                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            escape_into(text, out);
            out.push_str("\n\n");
        }
        Block::ListGroup { items } => {
            if items.len() <= config.layout.list_keep_together {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(items, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(items, out);
                out.push('\n');
            }
        }
        Block::LabeledParagraph { text } => {
            strong_to_typst(text, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { spans } => {
            body_to_typst(spans, out);
            out.push_str("\n\n");
        }
    }
}

fn list_to_typst(items: &[Vec<Span>], out: &mut String) {
    for item in items {
        out.push_str("- ");
        body_to_typst(item, out);
        out.push('\n');
    }
}

/// Spans that start a line of markup.
fn body_to_typst(spans: &[Span], out: &mut String) {
    let mut body = String::new();
    spans_to_typst(spans, &mut body);
    push_guarding_enum(&body, out);
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Plain(text) => escape_into(text, out),
            Span::Bold(text) if text.is_empty() => {}
            Span::Bold(text) => strong_to_typst(text, out),
        }
    }
}

// `*...*` only works at word boundaries, so use the function form. The
// semicolon stops a following `(` or `.` from continuing the call.
fn strong_to_typst(text: &str, out: &mut String) {
    let mut body = String::new();
    escape_into(text, &mut body);
    out.push_str("#strong[");
    push_guarding_enum(&body, out);
    out.push_str("];");
}

/// Push already escaped markup, escaping the dot of a leading `1. ` so Typst
/// does not read it as a numbered list item.
fn push_guarding_enum(body: &str, out: &mut String) {
    let indent = body.len() - body.trim_start().len();
    let rest = &body[indent..];
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let after = &rest[digits..];
    let is_marker = digits > 0
        && after.starts_with('.')
        && after[1..].chars().next().is_none_or(char::is_whitespace);

    if is_marker {
        let split = indent + digits;
        out.push_str(&body[..split]);
        out.push('\\');
        out.push_str(&body[split..]);
    } else {
        out.push_str(body);
    }
}

/// Escape characters with markup meaning in Typst
fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '+' | '-'
            | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}
