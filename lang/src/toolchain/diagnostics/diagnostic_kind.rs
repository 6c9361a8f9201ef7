/// The enumerated type of all diagnostics the toolchain emits.
#[derive(Clone, Copy, Debug)]
pub enum DiagnosticKind {
    LexerError { kind: LexerDiagnosticKind },
}

#[derive(Clone, Copy, Debug)]
pub enum LexerDiagnosticKind {
    /// A numeric literal that does not parse as a 64-bit float.
    NumberFormat,

    /// Input is not valid utf-8, halting lexing.
    InvalidUtf8,
}
