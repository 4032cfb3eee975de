//! Top-level block extraction.
//!
//! A block is a `<p>`, `<figure>`, `<ul>` or `<ol>` element, matched from its
//! opening tag to the first closing tag of the same name. Matching is not
//! recursive: a nested element of the same tag ends the block early. Everything
//! outside those four elements is skipped.

use super::text::strip_tags;
use regex::Regex;
use std::sync::LazyLock;

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(p|figure|ul|ol)\b[^>]*>").expect("Failed to compile block regex")
});

static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img\b").expect("Failed to compile img regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Figure,
    UnorderedList,
    OrderedList,
}

impl BlockKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(BlockKind::Paragraph),
            "figure" => Some(BlockKind::Figure),
            "ul" => Some(BlockKind::UnorderedList),
            "ol" => Some(BlockKind::OrderedList),
            _ => None,
        }
    }
}

/// One top-level block: its raw HTML (opening to closing tag) and plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub html: String,
    pub text: String,
}

impl Block {
    pub fn is_list(&self) -> bool {
        matches!(self.kind, BlockKind::UnorderedList | BlockKind::OrderedList)
    }

    pub fn has_image(&self) -> bool {
        IMG_RE.is_match(&self.html)
    }
}

/// Splits rendered HTML into its ordered top-level blocks.
///
/// Blocks without text are dropped unless they hold an `<img>`, so image-only
/// figures survive.
pub fn extract_blocks(html: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(caps) = OPEN_TAG_RE.captures_at(html, pos) {
        let (Some(open), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(kind) = BlockKind::from_tag(tag.as_str()) else {
            pos = open.end();
            continue;
        };

        let close = format!("</{}>", tag.as_str());
        let Some(offset) = html[open.end()..].find(&close) else {
            // Unterminated element: keep scanning inside it.
            pos = open.end();
            continue;
        };

        let inner_end = open.end() + offset;
        let end = inner_end + close.len();
        let block = Block {
            kind,
            html: html[open.start()..end].to_string(),
            text: strip_tags(&html[open.end()..inner_end]),
        };
        if !block.text.is_empty() || block.has_image() {
            blocks.push(block);
        }
        pos = end;
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_blocks_in_order() {
        let html = r#"<h2>Skipped</h2><p>First</p>
<figure class="wp-block-image"><img src="a.jpg" alt=""/></figure>
<ul><li>One</li><li>Two</li></ul><ol><li>Three</li></ol>"#;

        let blocks = extract_blocks(html);
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Paragraph,
                BlockKind::Figure,
                BlockKind::UnorderedList,
                BlockKind::OrderedList
            ]
        );
        assert_eq!(blocks[0].text, "First");
        assert_eq!(blocks[1].text, "");
        assert!(blocks[1].has_image());
        assert_eq!(blocks[2].text, "OneTwo");
        assert!(blocks[2].is_list());
    }

    #[test]
    fn test_empty_blocks_are_dropped() {
        let blocks = extract_blocks("<p></p><p>   </p><p>&nbsp;Kept</p>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "&nbsp;Kept");
    }

    #[test]
    fn test_similar_tag_names_are_not_blocks() {
        let blocks = extract_blocks("<pre>code</pre><picture>x</picture><param>");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_nested_same_tag_ends_block_early() {
        let blocks = extract_blocks("<ul><li>A<ul><li>B</li></ul></li></ul>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html, "<ul><li>A<ul><li>B</li></ul>");
    }

    #[test]
    fn test_first_closing_tag_ends_block() {
        let blocks = extract_blocks("<p>open <p>closed</p><p>next</p>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "open closed");
        assert_eq!(blocks[1].text, "next");
    }

    #[test]
    fn test_unterminated_block_is_scanned_into() {
        let blocks = extract_blocks("<figure><p>inside</p>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].text, "inside");
    }
}
