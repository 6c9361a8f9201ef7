use std::fmt;
use std::io::Write;

use super::diagnostic_kind::DiagnosticKind;

pub enum DiagnosticLevel {
    Note,
    Warning,
    Error,
}

/// A location in code referred to by the diagnostic.
pub struct DiagnosticLocation<'s> {
    pub file_name: &'s str,

    /// 1-based line number, or 0 when unknown.
    pub line_number: i32,

    /// 1-based column number, or 0 when unknown.
    pub column_number: i32,

    /// Full text of the source line, when available.
    pub line: &'s str,
}

impl<'s> fmt::Display for DiagnosticLocation<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name)?;
        if self.line_number > 0 {
            f.write_fmt(format_args!(":{}", self.line_number))?;
        }
        if self.column_number > 0 {
            f.write_fmt(format_args!(":{}", self.column_number))?;
        }
        Ok(())
    }
}

/// A single diagnostic message, part of a larger [Diagnostic].
pub struct DiagnosticMessage<'s> {
    pub kind: DiagnosticKind,
    pub location: DiagnosticLocation<'s>,
    pub body: String,
}

impl<'s> fmt::Display for DiagnosticMessage<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.location, self.body))
    }
}

/// A complete diagnostic: a main message plus optional notes, and a level.
pub struct Diagnostic<'s> {
    pub level: DiagnosticLevel,
    pub message: DiagnosticMessage<'s>,
    pub notes: Vec<DiagnosticMessage<'s>>,
}

impl<'s> Diagnostic<'s> {
    pub fn new(
        level: DiagnosticLevel,
        message: DiagnosticMessage<'s>,
        notes: Vec<DiagnosticMessage<'s>>,
    ) -> Diagnostic<'s> {
        Diagnostic { level, message, notes }
    }
}

impl<'s> fmt::Display for Diagnostic<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            DiagnosticLevel::Note => "NOTE",
            DiagnosticLevel::Warning => "WARNING",
            DiagnosticLevel::Error => "ERROR",
        };
        f.write_fmt(format_args!("{}: {}: {}", self.message.location, prefix, self.message.body))?;
        for note in self.notes.iter() {
            f.write_fmt(format_args!("\n{}: NOTE: {}", note.location, note.body))?;
        }
        Ok(())
    }
}

/// An interface for an object that can receive diagnostics from the toolchain
/// as they are emitted.
pub trait DiagnosticConsumer {
    fn handle_diagnostic(&mut self, diag: Diagnostic);
    fn flush(&mut self);
}

/// Discards every diagnostic. Useful for tests and fuzzing.
pub struct NullDiagnosticConsumer {}

impl DiagnosticConsumer for NullDiagnosticConsumer {
    fn handle_diagnostic(&mut self, _diag: Diagnostic) {}
    fn flush(&mut self) {}
}

pub struct StreamDiagnosticConsumer<W: Write> {
    stream: std::io::BufWriter<W>,
}

impl<W: Write> StreamDiagnosticConsumer<W> {
    pub fn new(stream: W) -> StreamDiagnosticConsumer<W> {
        StreamDiagnosticConsumer { stream: std::io::BufWriter::new(stream) }
    }
}

impl<W: Write> DiagnosticConsumer for StreamDiagnosticConsumer<W> {
    fn handle_diagnostic(&mut self, diag: Diagnostic) {
        // A failed write to the diagnostic stream is not itself reportable.
        let _ = writeln!(self.stream, "{}", diag);
    }

    fn flush(&mut self) {
        let _ = self.stream.flush();
    }
}

pub fn console_diagnostic_consumer() -> StreamDiagnosticConsumer<impl Write> {
    StreamDiagnosticConsumer::new(std::io::stderr())
}
