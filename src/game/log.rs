use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
/// One line of a game's narration.
pub struct LogLine {
    /// How deeply the line is nested (0 for game and turn headers).
    pub depth: u8,
    pub text: String,
}

/// The narration of one game, kept in memory until the game is over.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    lines: Vec<LogLine>,
    /// Whether lines are being dropped instead of kept.
    disabled: bool,
}

impl EventLog {
    /// Return a new, empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a log that ignores everything added to it.
    pub fn disabled() -> Self {
        EventLog {
            lines: vec![],
            disabled: true,
        }
    }

    /// Append a line at the specified depth.
    pub fn add(&mut self, depth: u8, text: impl Into<String>) {
        if self.disabled {
            return;
        }

        self.lines.push(LogLine {
            depth,
            text: text.into(),
        });
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }

    /// Write out the whole log, indenting every line by its depth.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{:width$}{}", "", line.text, width = line.depth as usize * 2)?;
        }

        Ok(())
    }
}

/// A log file shared by all the games of a simulation.
///
/// Games are played in parallel, so each game's log is appended as a
/// whole while holding the lock. Games therefore show up in the order
/// they finish, not the order they started.
pub struct LogFile {
    writer: Mutex<BufWriter<File>>,
}

impl LogFile {
    /// Create (or empty) the log file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(LogFile {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Append the narration of one game.
    pub fn append(&self, log: &EventLog) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "game log lock poisoned"))?;

        log.write_to(&mut *writer)
    }

    /// Flush everything appended so far to disk.
    pub fn flush(&self) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "game log lock poisoned"))?;

        writer.flush()
    }
}
