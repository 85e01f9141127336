use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Plain(String),
    Bold(String),
}

impl Span {
    /// The visible text of the span, without markers.
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text) | Span::Bold(text) => text,
        }
    }
}

/// Block-level elements of a comparison report, in source line order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `# `, `## ` or `### ` line. The text is kept verbatim.
    Heading { level: u8, text: String },
    /// A run of consecutive `- ` lines, one span sequence per line.
    ListGroup { items: Vec<Vec<Span>> },
    /// A whole `**label:**` line with every `**` removed.
    LabeledParagraph { text: String },
    Paragraph { spans: Vec<Span> },
}

impl Block {
    /// Visible text of the block. List items are joined with newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::LabeledParagraph { text } => text.clone(),
            Block::ListGroup { items } => items
                .iter()
                .map(|item| spans_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Paragraph { spans } => spans_text(spans),
        }
    }
}

fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_drops_markers() {
        let block = Block::Paragraph {
            spans: vec![
                Span::Plain("Hello ".into()),
                Span::Bold("world".into()),
                Span::Plain("!".into()),
            ],
        };
        assert_eq!(block.plain_text(), "Hello world!");
    }

    #[test]
    fn list_plain_text_is_one_line_per_item() {
        let block = Block::ListGroup {
            items: vec![vec![Span::Plain("a".into())], vec![Span::Bold("b".into())]],
        };
        assert_eq!(block.plain_text(), "a\nb");
    }

    #[test]
    fn serializes_tagged() {
        let heading = Block::Heading {
            level: 2,
            text: "Sub".into(),
        };
        assert_eq!(
            serde_json::to_string(&heading).unwrap(),
            r#"{"type":"heading","level":2,"text":"Sub"}"#
        );

        let para = Block::Paragraph {
            spans: vec![Span::Bold("x".into())],
        };
        assert_eq!(
            serde_json::to_string(&para).unwrap(),
            r#"{"type":"paragraph","spans":[{"type":"bold","text":"x"}]}"#
        );
    }
}
