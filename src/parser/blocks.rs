use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::card::CardFields;
use crate::utils::strip_controls_and_escapes;

use super::labels::{FieldLabel, parse_field};

// "1.", "2)", "### 3", "**4.**", "Card 5:" and whatever follows on the same line
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:#{1,6}\s*)?(?:\*\*|__)?(?:card\s*#?\s*\d+|#?\d+(?:[.)]|\s*$))(?:\*\*|__)?\s*[.):\-–]?\s*(?:\*\*|__)?\s*(.*)$",
    )
    .unwrap()
});
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s").unwrap());
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,}|={3,})$").unwrap());

/// One card's worth of labeled lines, before validation.
#[derive(Debug, Default, Clone)]
pub struct RawBlock {
    fields: CardFields,
    seen: Vec<FieldLabel>,
    last: Option<FieldLabel>,
}

impl RawBlock {
    /// At least one known field label was found.
    pub fn is_recognizable(&self) -> bool {
        !self.seen.is_empty()
    }

    pub fn has(&self, label: FieldLabel) -> bool {
        self.seen.contains(&label)
    }

    fn set(&mut self, label: FieldLabel, value: &str) {
        let slot = label.slot(&mut self.fields);
        if !slot.is_empty() && !value.is_empty() {
            slot.push('\n');
        }
        slot.push_str(value);
        if !self.seen.contains(&label) {
            self.seen.push(label);
        }
        self.last = Some(label);
    }

    fn append(&mut self, text: &str) -> bool {
        let Some(label) = self.last else {
            return false;
        };
        let slot = label.slot(&mut self.fields);
        if !slot.is_empty() {
            slot.push('\n');
        }
        slot.push_str(text);
        true
    }

    pub fn into_fields(self) -> CardFields {
        self.fields
    }
}

#[derive(Default)]
struct Splitter {
    blocks: Vec<RawBlock>,
    current: RawBlock,
    /// Blank lines separate fields rather than blocks.
    spaced_fields: bool,
    after_blank: bool,
}

impl Splitter {
    fn hard_break(&mut self) {
        let block = std::mem::take(&mut self.current);
        if block.is_recognizable() {
            self.blocks.push(block);
        }
        self.after_blank = false;
    }

    fn soft_break(&mut self) {
        if self.spaced_fields {
            self.after_blank = true;
        } else if self.current.is_recognizable() {
            self.hard_break();
        }
    }

    fn push_line(&mut self, content: &str, after_marker: bool) {
        if let Some((label, value)) = parse_field(content) {
            let repeated = self.current.has(label);
            let starts_new = (label == FieldLabel::Expression && repeated)
                || (self.after_blank && (label == FieldLabel::Expression || repeated));
            if starts_new {
                self.hard_break();
            }
            self.current.set(label, value);
            self.after_blank = false;
            return;
        }

        if after_marker {
            debug!(title = content, "ignoring unlabeled text after a card marker");
            return;
        }

        if self.after_blank {
            debug!(line = content, "ignoring unlabeled line after a blank line");
            return;
        }

        if !self.current.append(content) {
            debug!(line = content, "ignoring unlabeled line outside a block");
        }
    }

    /// A plain numbered line inside a card that already has an expression is a
    /// list item of the current field unless it carries a label of its own.
    fn is_list_item(&self, line: &str, rest: &str) -> bool {
        self.current.has(FieldLabel::Expression)
            && line.starts_with(|c: char| c.is_ascii_digit())
            && !rest.is_empty()
            && !is_field_line(rest)
    }

    fn finish(mut self) -> Vec<RawBlock> {
        self.hard_break();
        self.blocks
    }
}

/// Splits model output into per-expression blocks.
///
/// Markdown headings and separator lines always end a block, and so does a
/// second `Expression:` line. A numbered marker ends a block too, except for a
/// numbered list item inside a card that already has its expression. Text after
/// a marker counts only when it is a labeled field.
///
/// Blank lines end a block unless most blank-line paragraphs hold a single
/// field; then a blank line only ends a block when the next labeled line is an
/// `Expression` or repeats a label the current block already has.
pub fn split_blocks(text: &str) -> Vec<RawBlock> {
    let lines: Vec<String> = text.lines().map(strip_controls_and_escapes).collect();
    let mut splitter = Splitter {
        spaced_fields: fields_spaced_by_blank_lines(&lines),
        ..Splitter::default()
    };

    for line in &lines {
        if line.is_empty() {
            splitter.soft_break();
            continue;
        }
        if line.starts_with("```") {
            continue;
        }
        if SEPARATOR_RE.is_match(line) {
            splitter.hard_break();
            continue;
        }

        if let Some(rest) = marker_rest(line) {
            if splitter.is_list_item(line, rest) {
                splitter.push_line(line, false);
                continue;
            }
            splitter.hard_break();
            if !rest.is_empty() {
                splitter.push_line(rest, true);
            }
            continue;
        }

        if HEADING_RE.is_match(line) {
            splitter.hard_break();
            continue;
        }

        splitter.push_line(line, false);
    }

    splitter.finish()
}

fn marker_rest(line: &str) -> Option<&str> {
    MARKER_RE
        .captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str().trim()))
}

fn is_field_line(line: &str) -> bool {
    parse_field(line).is_some()
}

fn is_labeled(line: &str) -> bool {
    is_field_line(marker_rest(line).unwrap_or(line))
}

fn fields_spaced_by_blank_lines(lines: &[String]) -> bool {
    let mut paragraphs = Vec::new();
    let mut labeled = 0usize;
    for line in lines {
        if line.is_empty() {
            if labeled > 0 {
                paragraphs.push(labeled);
            }
            labeled = 0;
        } else if is_labeled(line) {
            labeled += 1;
        }
    }
    if labeled > 0 {
        paragraphs.push(labeled);
    }

    let single_field = paragraphs.iter().filter(|&&count| count == 1).count();
    paragraphs.len() >= 2 && single_field * 2 > paragraphs.len()
}
