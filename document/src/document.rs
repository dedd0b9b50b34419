use serde::Deserialize;
use serde::Serialize;

use crate::node::CodeBlockAttrs;
use crate::node::HeadingAttrs;
use crate::node::Node;
use crate::node::join_fragments;

/// The root of a rich-text tree: `{"type": "doc", "version": 1, "content": [...]}`.
///
/// `version` is always 1 and `content` is always present on the wire, even
/// when empty. Builders consume and return the document so construction
/// chains:
///
/// ```
/// use gantry_document::Document;
///
/// let doc = Document::new()
///     .add_heading("Release notes", 2)
///     .add_paragraph("Fixes the flux capacitor.")
///     .add_bullet_list(["faster", "smaller"]);
/// assert_eq!(doc.to_plain_text(), "Release notes\nFixes the flux capacitor.\nfaster smaller");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    kind: DocKind,
    version: u32,
    #[serde(default)]
    pub content: Vec<Node>,
}

/// The only valid root discriminator. Decoding any other tag fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum DocKind {
    #[serde(rename = "doc")]
    Doc,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Document {
            kind: DocKind::Doc,
            version: 1,
            content: Vec::new(),
        }
    }

    /// Build a document from plain text, one paragraph per blank-line-separated
    /// segment.
    ///
    /// Two consecutive newlines end the current paragraph (the second newline
    /// is consumed); a single newline folds into one space; everything else is
    /// copied verbatim. Trailing content becomes a final paragraph when
    /// non-empty, and empty input yields an empty document.
    pub fn from_plain_text(text: &str) -> Self {
        let mut doc = Document::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    if !current.is_empty() {
                        doc.content.push(Node::paragraph(std::mem::take(&mut current)));
                    }
                }
                '\n' => current.push(' '),
                _ => current.push(ch),
            }
        }
        if !current.is_empty() {
            doc.content.push(Node::paragraph(current));
        }
        doc
    }

    pub fn add_paragraph(mut self, text: impl Into<String>) -> Self {
        self.content.push(Node::paragraph(text));
        self
    }

    /// Append a heading. `level` is clamped to 1..=6, never rejected.
    pub fn add_heading(mut self, text: impl Into<String>, level: u8) -> Self {
        self.content.push(Node::Heading {
            attrs: HeadingAttrs {
                level: level.clamp(1, 6),
            },
            content: vec![Node::text(text)],
        });
        self
    }

    pub fn add_bullet_list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.push(Node::BulletList {
            content: list_items(items),
        });
        self
    }

    pub fn add_ordered_list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.push(Node::OrderedList {
            content: list_items(items),
        });
        self
    }

    pub fn add_code_block(mut self, code: impl Into<String>, language: Option<&str>) -> Self {
        self.content.push(Node::CodeBlock {
            attrs: language.map(|language| CodeBlockAttrs {
                language: Some(language.to_string()),
            }),
            content: vec![Node::text(code)],
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Extract the document's text: top-level fragments joined with `"\n"`,
    /// fragments inside a node joined with a single space (see
    /// [`Node::plain_text`]). An empty document yields `""`.
    ///
    /// List items join with a space rather than a newline, so a two-item
    /// bullet list extracts to `"Item 1 Item 2"`. Serialized fixtures depend
    /// on that exact output.
    pub fn to_plain_text(&self) -> String {
        join_fragments(&self.content, "\n")
    }
}

/// List items on the wire nest `listItem > paragraph > text`; a bare text
/// leaf directly under a list item is rejected by the service.
fn list_items<I, S>(items: I) -> Vec<Node>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(|item| Node::ListItem {
            content: vec![Node::paragraph(item)],
        })
        .collect()
}
