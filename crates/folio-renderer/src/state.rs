//! State structs tracking context during event processing.

use std::collections::HashSet;

use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    /// Language of current code block (e.g., "rust", "python").
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for tracking image alt text capture.
#[derive(Default)]
pub(crate) struct ImageState {
    /// Nesting depth; alt text of nested images is flattened into the outer one.
    depth: usize,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt_text.clear();
        }
        self.depth += 1;
    }

    /// End image capture. Returns the alt text once the outermost image closes.
    pub(crate) fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        (self.depth == 0).then(|| std::mem::take(&mut self.alt_text))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading ready to be written out.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CompletedHeading {
    pub level: u8,
    pub id: String,
    pub html: String,
}

/// State for tracking headings and generating their anchors.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Plain text of the heading (slug source and ToC title).
    text: String,
    /// Heading HTML (with inline formatting).
    html: String,
    toc: Vec<TocEntry>,
    slugger: Slugger,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Complete heading and record its table of contents entry.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);

        let id = self.slugger.slug(&text);
        self.toc.push(TocEntry {
            level,
            title: text.trim().to_owned(),
            id: id.clone(),
        });

        Some(CompletedHeading {
            level,
            id,
            html: html.trim().to_owned(),
        })
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Generates unique heading IDs within one document.
///
/// Repeated slugs get `-1`, `-2`, ... appended, skipping any suffix that is
/// already taken.
#[derive(Default)]
pub(crate) struct Slugger {
    seen: HashSet<String>,
}

impl Slugger {
    pub(crate) fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut id = base.clone();
        let mut n = 0;
        while self.seen.contains(&id) {
            n += 1;
            id = format!("{base}-{n}");
        }
        self.seen.insert(id.clone());
        id
    }
}

/// Convert heading text to an anchor slug, GitHub style.
///
/// Lower-cases the text, keeps Unicode letters, digits, `-` and `_`, turns
/// each space into `-` and drops everything else. Runs of spaces are not
/// collapsed.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            result.extend(c.to_lowercase());
        } else if c == ' ' {
            result.push('-');
        }
    }
    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
