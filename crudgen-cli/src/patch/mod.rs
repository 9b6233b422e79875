//! Aggregator file patching
//!
//! Aggregator files (the query registry `db.js` and the route registry
//! `routes/index.js`) are parsed into an ordered list of [`Segment`]s:
//! registered imports, the opening line of the aggregation body, registered
//! body entries, the body close, the default export, and everything else as
//! verbatim text. Patches operate on that list and the file is re-emitted
//! deterministically, so unrelated text that merely looks like a model name
//! is never touched.
//!
//! The concrete line shapes live behind [`AggregatorSyntax`]; see
//! [`QueryRegistry`] and [`RouteRegistry`].

mod registry;
mod routes;

pub use registry::QueryRegistry;
pub use routes::RouteRegistry;

use crate::model::ModelDescriptor;
use regex::Regex;

/// Line shapes of one kind of aggregator file
pub trait AggregatorSyntax {
    /// File label used in user-facing messages
    fn label(&self) -> &'static str;

    /// Registration key for a model (what imports and entries are keyed by)
    fn key(&self, model: &ModelDescriptor) -> String;

    /// Canonical import line for `key`
    fn import_line(&self, key: &str) -> String;

    /// Key of a recognised import line
    fn import_key(&self, line: &str) -> Option<String>;

    /// Canonical opening line of the aggregation body
    fn anchor_line(&self) -> &'static str;

    /// Pattern for the opening line; capture group 1 matches when the body is
    /// closed on the same line
    fn anchor_pattern(&self) -> &Regex;

    /// Canonical body entry for `key`
    fn entry_line(&self, key: &str) -> String;

    /// Key of a recognised body entry
    fn entry_key(&self, line: &str) -> Option<String>;

    /// Canonical closing line of the aggregation body
    fn close_line(&self) -> &'static str;

    /// Canonical default export
    fn export_line(&self) -> &'static str;

    /// Pattern for the default export
    fn export_pattern(&self) -> &Regex;
}

/// Which way to patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    /// Import and entry exist exactly once (create)
    EnsurePresent,
    /// Import and entry are gone (remove)
    EnsureAbsent,
}

/// Result of patching a file's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// New file content
    pub content: String,
    /// Whether `content` differs from the input
    pub changed: bool,
}

/// One logical line of an aggregator file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Registered import, by key
    Import(String),
    /// Aggregation body opening, raw text
    Anchor(String),
    /// Registered body entry, by key
    Entry(String),
    /// Aggregation body close, raw text
    Close(String),
    /// Default export
    Export,
    /// Anything else, kept verbatim
    Text(String),
}

/// One parsed line together with its original terminator
#[derive(Debug, Clone)]
struct Line {
    segment: Segment,
    /// `"\n"`, `"\r\n"`, or empty for an unterminated last line
    eol: &'static str,
}

impl Line {
    const fn new(segment: Segment, eol: &'static str) -> Self {
        Self { segment, eol }
    }
}

/// Parsed aggregator file
#[derive(Debug, Clone)]
pub struct AggregatorFile<'s, S: AggregatorSyntax> {
    syntax: &'s S,
    lines: Vec<Line>,
    /// Line ending used for lines added by a patch
    newline: &'static str,
    changed: bool,
}

impl<'s, S: AggregatorSyntax> AggregatorFile<'s, S> {
    /// Parse `text`; an empty string is an empty file
    #[must_use]
    pub fn parse(syntax: &'s S, text: &str) -> Self {
        let newline = detect_newline(text);
        let mut lines = Vec::new();
        // Brace depth while inside the aggregation body
        let mut depth: Option<i32> = None;
        let mut seen_body = false;

        for raw in text.split_inclusive('\n') {
            let (line, eol) = split_eol(raw);

            if let Some(d) = depth {
                if d == 1 {
                    if let Some(key) = syntax.entry_key(line) {
                        lines.push(Line::new(Segment::Entry(key), eol));
                        continue;
                    }
                }
                let d = d + brace_delta(line);
                if d <= 0 {
                    lines.push(Line::new(Segment::Close(line.to_string()), eol));
                    depth = None;
                } else {
                    lines.push(Line::new(Segment::Text(line.to_string()), eol));
                    depth = Some(d);
                }
                continue;
            }

            if !seen_body {
                if let Some(caps) = syntax.anchor_pattern().captures(line) {
                    seen_body = true;
                    if caps.get(1).is_some() {
                        lines.push(Line::new(
                            Segment::Anchor(syntax.anchor_line().to_string()),
                            newline,
                        ));
                        lines.push(Line::new(
                            Segment::Close(syntax.close_line().to_string()),
                            eol,
                        ));
                    } else {
                        lines.push(Line::new(Segment::Anchor(line.to_string()), eol));
                        depth = Some(1);
                    }
                    continue;
                }
            }

            if let Some(key) = syntax.import_key(line) {
                lines.push(Line::new(Segment::Import(key), eol));
            } else if syntax.export_pattern().is_match(line) {
                lines.push(Line::new(Segment::Export, eol));
            } else {
                lines.push(Line::new(Segment::Text(line.to_string()), eol));
            }
        }

        Self {
            syntax,
            lines,
            newline,
            changed: false,
        }
    }

    /// Parsed segments in file order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.lines.iter().map(|line| &line.segment)
    }

    /// Keys registered inside the aggregation body, in file order
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        self.segments()
            .filter_map(|s| match s {
                Segment::Entry(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether a patch has modified the parsed file
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Make sure `key` is imported and registered exactly once
    pub fn ensure_present(&mut self, key: &str) {
        if !self.dedupe(|s| matches!(s, Segment::Import(k) if k == key)) {
            tracing::debug!(file = self.syntax.label(), key, "Prepending import");
            self.insert(0, Segment::Import(key.to_string()));
        }

        if !self.dedupe(|s| matches!(s, Segment::Entry(k) if k == key)) {
            self.insert_entry(key);
        }

        if !self.segments().any(|s| matches!(s, Segment::Export)) {
            tracing::debug!(file = self.syntax.label(), "Appending default export");
            let ends_blank = match self.lines.last().map(|l| &l.segment) {
                Some(Segment::Text(t)) => t.trim().is_empty(),
                Some(_) => false,
                None => true,
            };
            if !ends_blank {
                self.push(Segment::Text(String::new()));
            }
            self.push(Segment::Export);
        }
    }

    /// Drop the import and entry registered under `key`
    pub fn ensure_absent(&mut self, key: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| match &line.segment {
            Segment::Import(k) | Segment::Entry(k) => k != key,
            _ => true,
        });
        let removed = before - self.lines.len();
        self.changed |= removed > 0;
        tracing::debug!(file = self.syntax.label(), key, removed, "Removed registrations");
    }

    /// Apply `mode` for `key`
    pub fn apply(&mut self, key: &str, mode: PatchMode) {
        match mode {
            PatchMode::EnsurePresent => self.ensure_present(key),
            PatchMode::EnsureAbsent => self.ensure_absent(key),
        }
    }

    /// Serialize back to text
    ///
    /// Recognised lines are emitted in canonical form, every line keeps its
    /// original terminator, and the output always ends with a line break.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match &line.segment {
                Segment::Import(key) => out.push_str(&self.syntax.import_line(key)),
                Segment::Entry(key) => out.push_str(&self.syntax.entry_line(key)),
                Segment::Export => out.push_str(self.syntax.export_line()),
                Segment::Anchor(raw) | Segment::Close(raw) | Segment::Text(raw) => {
                    out.push_str(raw);
                }
            }
            out.push_str(if line.eol.is_empty() {
                self.newline
            } else {
                line.eol
            });
        }
        out
    }

    fn insert(&mut self, index: usize, segment: Segment) {
        self.lines.insert(index, Line::new(segment, self.newline));
        self.changed = true;
    }

    fn push(&mut self, segment: Segment) {
        self.insert(self.lines.len(), segment);
    }

    /// Keep only the first segment matching `pred`; false if none matched
    fn dedupe(&mut self, pred: impl Fn(&Segment) -> bool) -> bool {
        let mut found = false;
        let before = self.lines.len();
        self.lines.retain(|line| {
            if !pred(&line.segment) {
                return true;
            }
            let keep = !found;
            found = true;
            keep
        });
        self.changed |= self.lines.len() != before;
        found
    }

    fn insert_entry(&mut self, key: &str) {
        let entry = Segment::Entry(key.to_string());

        let anchor = self.segments().position(|s| matches!(s, Segment::Anchor(_)));
        if let Some(anchor) = anchor {
            tracing::debug!(file = self.syntax.label(), key, "Inserting entry after anchor");
            self.insert(anchor + 1, entry);
            return;
        }

        tracing::debug!(file = self.syntax.label(), key, "Synthesizing aggregation body");
        let body = [
            Segment::Anchor(self.syntax.anchor_line().to_string()),
            entry,
            Segment::Close(self.syntax.close_line().to_string()),
        ];

        let export = self.segments().position(|s| matches!(s, Segment::Export));
        if let Some(export) = export {
            let spaced = body.into_iter().chain([Segment::Text(String::new())]);
            for (offset, segment) in spaced.enumerate() {
                self.insert(export + offset, segment);
            }
        } else {
            self.push(Segment::Text(String::new()));
            for segment in body {
                self.push(segment);
            }
            self.push(Segment::Text(String::new()));
            self.push(Segment::Export);
        }
    }
}

/// Patch `text` for `model` in the given mode
///
/// Text that needs no change is returned as is.
#[must_use]
pub fn patch<S: AggregatorSyntax>(
    syntax: &S,
    text: &str,
    model: &ModelDescriptor,
    mode: PatchMode,
) -> PatchOutcome {
    let key = syntax.key(model);
    let mut file = AggregatorFile::parse(syntax, text);
    file.apply(&key, mode);

    let changed = file.is_changed();
    let content = if changed {
        file.render()
    } else {
        text.to_string()
    };
    PatchOutcome { content, changed }
}

/// Captures 1 and 2 must name the same key (`import x from './x.js'`)
fn paired_key(pattern: &Regex, line: &str) -> Option<String> {
    let caps = pattern.captures(line)?;
    let (a, b) = (caps.get(1)?.as_str(), caps.get(2)?.as_str());
    (a == b).then(|| a.to_string())
}

/// Line ending of the first line, `\n` for single-line or empty text
fn detect_newline(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

fn split_eol(raw: &str) -> (&str, &'static str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}

/// Net `{`/`}` count of a line, ignoring string literals and comments
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(_), '\\') => {
                chars.next();
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '/') if chars.peek() == Some(&'/') => break,
            (None, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            (None, '{') => delta += 1,
            (None, '}') => delta -= 1,
            _ => {}
        }
    }
    delta
}
