use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A formatting mark attached to a text node (bold, italic, link, ...).
///
/// Marks are carried through encode/decode untouched; plain-text extraction
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
}

/// Attributes of a heading node. `level` is kept in 1..=6 by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

/// Attributes of a code block node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One node of the document tree.
///
/// The set of node kinds is closed: the wire discriminator is the `type`
/// field, and an unrecognized kind fails the decode of the whole document.
/// Container kinds carry `content`; only `text` carries a text value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    BulletList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    OrderedList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    ListItem {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<CodeBlockAttrs>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

impl Node {
    /// Bare text leaf with no marks.
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Paragraph wrapping a single text leaf.
    pub fn paragraph(text: impl Into<String>) -> Node {
        Node::Paragraph {
            content: vec![Node::text(text)],
        }
    }

    /// Recursively extracted text of this node's subtree.
    ///
    /// A text leaf contributes its literal value. A container contributes its
    /// children's fragments joined with a single space; children with no text
    /// anywhere below them are dropped rather than producing doubled
    /// separators. A subtree with no text at all yields `""`.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content }
            | Node::CodeBlock { content, .. } => join_fragments(content, " "),
        }
    }
}

/// Join the non-empty extracted fragments of `nodes` with `sep`.
pub(crate) fn join_fragments(nodes: &[Node], sep: &str) -> String {
    let mut out = String::new();
    for fragment in nodes.iter().map(Node::plain_text) {
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(sep);
        }
        out.push_str(&fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn text_node_wire_shape() {
        let node = Node::text("hello");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "text", "text": "hello"})
        );
    }

    #[test]
    fn marks_round_trip_untouched() {
        let wire = json!({
            "type": "text",
            "text": "bold link",
            "marks": [
                {"type": "strong"},
                {"type": "link", "attrs": {"href": "https://example.com"}}
            ]
        });
        let node: Node = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), wire);
        assert_eq!(node.plain_text(), "bold link");
    }

    #[test]
    fn unknown_node_kind_fails_decode() {
        let wire = json!({"type": "mediaGroup", "content": []});
        assert!(serde_json::from_value::<Node>(wire).is_err());
    }

    #[test]
    fn container_tags_are_camel_case() {
        let node = Node::BulletList {
            content: vec![Node::ListItem {
                content: vec![Node::paragraph("x")],
            }],
        };
        let wire = serde_json::to_value(&node).unwrap();
        assert_eq!(wire["type"], "bulletList");
        assert_eq!(wire["content"][0]["type"], "listItem");
    }

    #[test]
    fn empty_subtree_contributes_no_separator() {
        let nodes = vec![
            Node::paragraph("a"),
            Node::Paragraph {
                content: Vec::new(),
            },
            Node::paragraph("b"),
        ];
        assert_eq!(join_fragments(&nodes, " "), "a b");
    }
}
