//! Line and column tracking for buffered input.

use std::io::{self, BufRead, Read};

/// A byte offset with the line it lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of input.
    pub offset: u64,
    /// 1-based line number.
    pub line: u64,
    /// Offset of the first byte of `line`.
    pub line_start: u64,
}

impl Position {
    /// The first byte of input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        line_start: 0,
    };

    /// 1-based column, counted in bytes.
    #[must_use]
    pub fn column(&self) -> u64 {
        self.offset - self.line_start + 1
    }

    /// The position one byte earlier, on the same line.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            offset: self.offset.saturating_sub(1).max(self.line_start),
            ..*self
        }
    }
}

/// A [`BufRead`] adapter that counts newlines in the bytes consumed from it.
///
/// Only newlines consumed since the last [`mark`](Self::mark) are kept, so
/// memory stays bounded by the size of one token while positions inside
/// that token can still be resolved.
pub struct LineTracker<R> {
    inner: R,
    consumed: u64,
    mark: Position,
    newlines: Vec<u64>,
}

impl<R: BufRead> LineTracker<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            consumed: 0,
            mark: Position::START,
            newlines: Vec::new(),
        }
    }

    /// Remember the current position as the base for later lookups.
    pub fn mark(&mut self) -> Position {
        self.mark = self.position_at(self.consumed);
        self.newlines.clear();
        self.mark
    }

    /// Position of everything consumed so far.
    #[must_use]
    pub fn current(&self) -> Position {
        self.position_at(self.consumed)
    }

    /// Position of `offset`, clamped to the range between the last mark and
    /// the bytes consumed so far.
    #[must_use]
    pub fn position_at(&self, offset: u64) -> Position {
        let offset = offset.clamp(self.mark.offset, self.consumed.max(self.mark.offset));
        let passed = self.newlines.partition_point(|&newline| newline < offset);
        let line_start = passed
            .checked_sub(1)
            .and_then(|index| self.newlines.get(index))
            .map_or(self.mark.line_start, |newline| newline + 1);
        Position {
            offset,
            line: self.mark.line + passed as u64,
            line_start,
        }
    }
}

impl<R: BufRead> Read for LineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.inner.fill_buf()?;
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.consume(count);
        Ok(count)
    }
}

impl<R: BufRead> BufRead for LineTracker<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        // Consumed bytes are still buffered, so this does no I/O.
        if let Ok(available) = self.inner.fill_buf() {
            let base = self.consumed;
            let consumed = &available[..amt.min(available.len())];
            self.newlines.extend(
                consumed
                    .iter()
                    .enumerate()
                    .filter(|(_, byte)| **byte == b'\n')
                    .map(|(index, _)| base + index as u64),
            );
        }
        self.inner.consume(amt);
        self.consumed += amt as u64;
    }
}
