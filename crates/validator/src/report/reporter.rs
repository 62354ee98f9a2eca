//! Collecting report text during one validation pass
//!
//! The reporter keeps a stack of frames, one per open aggregation. Leaves
//! append a text part to the top frame; closing a frame flushes its parts
//! into the parent (or the output) when the aggregation failed, or when it
//! sits inside a `NOT` where a success is what makes the outer rule fail.
//!
//! Text rules:
//!
//! - parts are joined with " AND " (`AND`, `ALL`) or " OR " (`OR`, `ANY`)
//! - a frame with several parts is parenthesized when it is flushed into
//!   another frame; top-level text is never parenthesized
//! - a leaf directly under `NOT` is rendered with the negated operator
//!   phrase ("must be less than"); any other `NOT` content gets a "NOT "
//!   prefix
//! - `ANY` frames drop repeated parts, since every element renders as
//!   "at least one element of ..."
//! - an explained frame replaces everything below it with its message

use indexmap::IndexSet;

use crate::adapter::Check;
use crate::foundation::Status;
use crate::path::Member;
use crate::property::Property;
use crate::report::{Formatter, Locale};

/// Kind of an open report frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    And,
    Or,
    Not,
    Any,
    All,
    /// Canned message replacing the nested text.
    Explained(String),
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    parts: Vec<String>,
    /// A leaf already rendered the negation itself.
    negated_inline: bool,
}

/// Dotted paths of failing members in the order they were recorded.
pub type FailedMembers = IndexSet<String>;

/// Final text and failing members of a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub failed_members: FailedMembers,
}

impl Report {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Per-pass report state.
#[derive(Debug)]
pub struct Reporter<'l> {
    formatter: Formatter<'l>,
    frames: Vec<Frame>,
    not_depth: usize,
    suppress: usize,
    failed: FailedMembers,
    output: Vec<String>,
}

impl<'l> Reporter<'l> {
    pub fn new(locale: &'l Locale) -> Self {
        Self {
            formatter: Formatter::new(locale),
            frames: Vec::new(),
            not_depth: 0,
            suppress: 0,
            failed: FailedMembers::new(),
            output: Vec::new(),
        }
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn failed_members(&self) -> &FailedMembers {
        &self.failed
    }

    /// A leaf ran with `status`.
    pub fn condition(&mut self, status: Status, check: &Check<'_>) {
        self.leaf(status, check.member, |formatter, negated| {
            formatter.condition(check, negated)
        });
    }

    /// An existence check ran with `status`.
    pub fn exists(
        &mut self,
        status: Status,
        member: &Member,
        property: Option<&Property>,
        expected: bool,
    ) {
        self.leaf(status, member, |formatter, negated| {
            formatter.exists(member, property, expected != negated)
        });
    }

    fn leaf<F>(&mut self, status: Status, member: &Member, render: F)
    where
        F: FnOnce(&Formatter<'l>, bool) -> String,
    {
        // a failing leaf is recorded even when an enclosing NOT passes; under
        // an odd number of NOTs a success is what fails the rule
        let failing = status.is_fail() || (self.not_depth % 2 == 1 && status.is_success());
        if failing && !member.is_root() {
            self.failed.insert(member.dotted());
        }

        if self.suppress > 0 || !self.reportable(status) {
            return;
        }
        let negated = self
            .frames
            .last()
            .is_some_and(|frame| frame.kind == FrameKind::Not);
        let text = render(&self.formatter, negated);
        if let Some(frame) = self.frames.last_mut() {
            frame.negated_inline |= negated;
        }
        self.emit(text);
    }

    /// Failures are reported, and so is anything but `Ignore` inside `NOT`.
    fn reportable(&self, status: Status) -> bool {
        status.is_fail() || (self.not_depth > 0 && !status.is_ignore())
    }

    fn emit(&mut self, text: String) {
        match self.frames.last_mut() {
            Some(frame) => frame.parts.push(text),
            None => self.output.push(text),
        }
    }

    pub fn open(&mut self, kind: FrameKind) {
        match kind {
            FrameKind::Not => self.not_depth += 1,
            FrameKind::Explained(_) => self.suppress += 1,
            _ => {}
        }
        self.frames.push(Frame {
            kind,
            parts: Vec::new(),
            negated_inline: false,
        });
    }

    pub fn close(&mut self, status: Status) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match frame.kind {
            FrameKind::Not => self.not_depth = self.not_depth.saturating_sub(1),
            FrameKind::Explained(_) => self.suppress = self.suppress.saturating_sub(1),
            _ => {}
        }
        if self.suppress > 0 || !self.reportable(status) {
            return;
        }
        if let Some(text) = self.render(frame) {
            self.emit(text);
        }
    }

    fn render(&self, frame: Frame) -> Option<String> {
        let Frame {
            kind,
            mut parts,
            negated_inline,
        } = frame;
        let word = match &kind {
            FrameKind::Explained(message) => {
                return Some(self.formatter.phrase(message, Default::default()).text);
            }
            FrameKind::And | FrameKind::All | FrameKind::Not => "AND",
            FrameKind::Or | FrameKind::Any => "OR",
        };
        if kind == FrameKind::Any {
            let mut seen = IndexSet::new();
            parts.retain(|part| seen.insert(part.clone()));
        }
        let joined = match parts.len() {
            0 => return None,
            1 => parts.swap_remove(0),
            _ => {
                let separator = format!(" {} ", self.formatter.word(word));
                let joined = parts.join(&separator);
                if self.frames.is_empty() {
                    joined
                } else {
                    format!("({joined})")
                }
            }
        };
        if kind == FrameKind::Not && !negated_inline {
            Some(format!("{} {joined}", self.formatter.word("NOT")))
        } else {
            Some(joined)
        }
    }

    /// Consumes the reporter. Top-level parts are joined with "; ".
    pub fn finish(self) -> Report {
        Report {
            text: self.output.join("; "),
            failed_members: self.failed,
        }
    }
}
