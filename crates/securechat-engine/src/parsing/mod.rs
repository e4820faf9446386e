pub mod blocks;

use log::debug;

use blocks::{ContentBlock, Segment, Segmenter, build_list_tree};

/// Converts markdown text into content blocks in source order.
///
/// Fences and paragraphs become one leaf block each, with their lines joined
/// by `'\n'`. Each list run contributes its top-level items as separate
/// blocks. Blank runs contribute nothing. Never fails.
pub fn parse_markdown(text: &str) -> Vec<ContentBlock> {
    let mut out = Vec::new();
    for segment in Segmenter::new(text) {
        match segment {
            Segment::Blank => {}
            Segment::Fence(lines) | Segment::Paragraph(lines) => {
                out.push(ContentBlock::leaf(lines.join("\n")));
            }
            Segment::ListRun(items) => out.extend(build_list_tree(&items)),
        }
    }
    debug!("parsed {} top-level blocks", out.len());
    out
}
