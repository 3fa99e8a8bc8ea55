use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Local};

/// Visual marker prefixed to a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Globe,
    MagnifierLeft,
    Book,
    Pencil,
    Laptop,
    MagnifierRight,
    Robot,
    Wrench,
    Speech,
    Cross,
    Warning,
    Check,
}

impl Glyph {
    pub fn as_str(&self) -> &'static str {
        match self {
            Glyph::Globe => "🌐",
            Glyph::MagnifierLeft => "🔍",
            Glyph::Book => "📖",
            Glyph::Pencil => "✏️",
            Glyph::Laptop => "💻",
            Glyph::MagnifierRight => "🔎",
            Glyph::Robot => "🤖",
            Glyph::Wrench => "🔧",
            Glyph::Speech => "💬",
            Glyph::Cross => "❌",
            Glyph::Warning => "⚠️",
            Glyph::Check => "✅",
        }
    }

    /// Gap between the glyph and the text. Glyphs built with a variation
    /// selector render one cell narrow, so they get an extra space.
    fn separator(&self) -> &'static str {
        match self {
            Glyph::Pencil | Glyph::Warning => "  ",
            _ => " ",
        }
    }
}

/// A console line before it is timestamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub glyph: Option<Glyph>,
    pub text: String,
}

impl ConsoleLine {
    pub fn new(glyph: Glyph, text: impl Into<String>) -> Self {
        Self {
            glyph: Some(glyph),
            text: text.into(),
        }
    }

    /// A continuation line with no glyph, e.g. an item under a summary.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            glyph: None,
            text: text.into(),
        }
    }
}

impl fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.glyph {
            Some(glyph) => write!(f, "{}{}{}", glyph.as_str(), glyph.separator(), self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Writes `[HH:MM:SS] <line>` to the underlying stream, flushing after
/// every line so a supervising process sees progress live.
pub struct ConsoleWriter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()> {
        self.write_line_at(line, Local::now())
    }

    pub fn write_line_at(&mut self, line: &ConsoleLine, at: DateTime<Local>) -> io::Result<()> {
        writeln!(self.out, "[{}] {}", at.format("%H:%M:%S"), line)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
