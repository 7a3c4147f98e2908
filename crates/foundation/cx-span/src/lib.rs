//! Source positions for C++ translation units
//!
//! Byte spans locate syntax nodes; `Location` is the coarser `file:line`
//! pair that the semantic analyzer hands over when it requests an
//! instantiation.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize, Display)]
#[display("file#{_0}")]
pub struct FileId(pub u32);

impl FileId {
    /// Creates a file id
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A byte offset span in a source file
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// First byte
    pub start: u32,
    /// One past the last byte
    pub end: u32,
}

impl Span {
    /// Creates a span
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Byte range covered by the span
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A span with associated file
///
/// Nodes synthesized by the compiler (folded literals, for instance) carry
/// `FileSpan::default()`.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileSpan {
    /// File containing the span
    pub file: FileId,
    /// Byte span inside the file
    pub span: Span,
}

impl FileSpan {
    /// Creates a file span
    #[must_use]
    pub const fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }

    /// Byte range covered by the span
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.span.range()
    }
}

/// Point of instantiation, reported in diagnostics as `file:line`
#[derive(Clone, Debug, Hash, Eq, PartialEq, Display)]
#[display("{file}:{line}")]
pub struct Location {
    /// File name as written on the command line
    pub file: Arc<str>,
    /// 1-based line number
    pub line: u32,
}

impl Location {
    /// Creates a location
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location used for entities the compiler creates itself
    #[must_use]
    pub fn builtin() -> Self {
        Self::new("<builtin>", 0)
    }
}
