use crate::parsing::blocks::classify::LineClass;

/// Paragraph segment type (marker struct).
///
/// Paragraphs have no delimiters - they are the fallback segment when a
/// line is neither blank, a fence, nor a list item.
pub struct Paragraph;

impl Paragraph {
    /// Whether a classified line may extend a paragraph that is already open.
    pub fn continues(lc: &LineClass) -> bool {
        !lc.is_blank && !lc.is_fence && lc.list_item.is_none()
    }
}
