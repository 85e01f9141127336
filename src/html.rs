//! HTML rendering of formatted reports.
//!
//! Produces the same element structure and utility classes the web
//! dashboard uses for comparison results, so the output can be dropped into
//! a page styled with Tailwind.

use maud::{Markup, html};

use crate::block::{Block, Span};
use crate::config::Config;

/// Renders blocks into a wrapper `div` as an HTML string.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    html! {
        div class=(config.html.wrapper_class) {
            @for block in blocks {
                (block_markup(block))
            }
        }
    }
    .into_string()
}

/// Renders a single block.
///
/// Headings and labeled paragraphs are emitted as text; paragraphs and list
/// items render each span as `strong` (bold) or `span` (plain).
pub fn block_markup(block: &Block) -> Markup {
    match block {
        Block::Heading { level: 1, text } => html! {
            h1 class="text-3xl font-bold mt-6 mb-4 text-gray-800" { (text) }
        },
        Block::Heading { level: 2, text } => html! {
            h2 class="text-2xl font-bold mt-5 mb-3 text-gray-700" { (text) }
        },
        Block::Heading { text, .. } => html! {
            h3 class="text-xl font-semibold mt-4 mb-2 text-gray-700" { (text) }
        },
        Block::ListGroup { items } => html! {
            ul class="list-disc ml-6 mb-4 space-y-1" {
                @for item in items {
                    li class="text-gray-700" { (spans_markup(item)) }
                }
            }
        },
        Block::LabeledParagraph { text } => html! {
            p class="font-semibold mt-3 mb-2 text-gray-700" { (text) }
        },
        Block::Paragraph { spans } => html! {
            p class="mb-2 text-gray-600" { (spans_markup(spans)) }
        },
    }
}

fn spans_markup(spans: &[Span]) -> Markup {
    html! {
        @for span in spans {
            @match span {
                Span::Bold(text) => strong { (text) },
                Span::Plain(text) => span { (text) },
            }
        }
    }
}
