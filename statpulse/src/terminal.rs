//! Cursor and screen control for the in-place display.
//!
//! Everything is queued on the caller's writer; callers flush when a tick or frame
//! is complete.

use std::{fmt, io};

use crossterm::{
    cursor::{MoveDown, MoveTo, MoveToNextLine},
    queue,
    terminal::{Clear, ClearType},
    Command,
};

/// `ESC[<row>;0H`: jump to a 1-based row, column left to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToRow(pub u32);

impl Command for MoveToRow {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[{};0H", self.0)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "row positioning requires an ANSI terminal",
        ))
    }
}

pub fn clear_and_home<W: io::Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

pub fn home<W: io::Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveTo(0, 0))
}

/// Writes `payload` starting at `row`. An empty payload blanks the row instead.
pub fn place<W: io::Write>(out: &mut W, row: u32, payload: &[u8]) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), MoveToRow(row))?;
    if payload.is_empty() {
        queue!(out, Clear(ClearType::CurrentLine))
    } else {
        out.write_all(payload)
    }
}

/// Drops the cursor below everything drawn so far.
pub fn park_below<W: io::Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveDown(999))
}

/// Leaves the cursor on the last terminal row for the shell prompt.
pub fn park_bottom<W: io::Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveTo(0, 998))
}

pub fn below_display<W: io::Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveToNextLine(30))
}
