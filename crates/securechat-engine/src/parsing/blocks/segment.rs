use log::debug;

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::Paragraph,
    types::Segment,
};

const BOM: char = '\u{feff}';

/// Splits text into [`Segment`]s with a single forward cursor.
///
/// Rules are tried in priority order at the cursor line: blank, fence
/// opener, list item, paragraph. Every line is consumed exactly once.
pub struct Segmenter<'a> {
    lines: Vec<LineClass<'a>>,
    cursor: usize,
}

impl<'a> Segmenter<'a> {
    /// Splits `text` on `'\n'`, ignoring a leading byte order mark.
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let classifier = MarkdownLineClassifier;
        Self {
            lines: text.split('\n').map(|line| classifier.classify(line)).collect(),
            cursor: 0,
        }
    }

    fn take_blank_run(&mut self) -> Segment {
        while self.lines.get(self.cursor).is_some_and(|lc| lc.is_blank) {
            self.cursor += 1;
        }
        Segment::Blank
    }

    /// Collects through the next fence line, or to end of input when unterminated.
    fn take_fence(&mut self) -> Segment {
        let mut lines = vec![self.lines[self.cursor].text.to_string()];
        self.cursor += 1;
        while let Some(lc) = self.lines.get(self.cursor) {
            lines.push(lc.text.to_string());
            self.cursor += 1;
            if lc.is_fence {
                break;
            }
        }
        Segment::Fence(lines)
    }

    fn take_list_run(&mut self) -> Segment {
        let mut items = Vec::new();
        while let Some(item) = self
            .lines
            .get(self.cursor)
            .and_then(|lc| lc.list_item.clone())
        {
            items.push(item);
            self.cursor += 1;
        }
        Segment::ListRun(items)
    }

    fn take_paragraph(&mut self) -> Segment {
        let mut lines = vec![self.lines[self.cursor].text.to_string()];
        self.cursor += 1;
        while let Some(lc) = self.lines.get(self.cursor) {
            if !Paragraph::continues(lc) {
                break;
            }
            lines.push(lc.text.to_string());
            self.cursor += 1;
        }
        Segment::Paragraph(lines)
    }
}

impl Iterator for Segmenter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let lc = self.lines.get(self.cursor)?;
        let (is_blank, is_fence, is_list_item) =
            (lc.is_blank, lc.is_fence, lc.list_item.is_some());
        let start = self.cursor;
        let segment = if is_blank {
            self.take_blank_run()
        } else if is_fence {
            self.take_fence()
        } else if is_list_item {
            self.take_list_run()
        } else {
            self.take_paragraph()
        };
        debug!(
            "segment {} spans lines {}..{}",
            segment.kind_name(),
            start,
            self.cursor
        );
        Some(segment)
    }
}

impl Segment {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Segment::Blank => "blank",
            Segment::Fence(_) => "fence",
            Segment::ListRun(_) => "list",
            Segment::Paragraph(_) => "paragraph",
        }
    }
}

/// Segments `text`, blank runs included.
pub fn segment(text: &str) -> Vec<Segment> {
    Segmenter::new(text).collect()
}
