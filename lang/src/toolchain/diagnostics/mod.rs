//! Production and routing of diagnostic feedback from the toolchain.

pub mod diagnostic_emitter;
pub mod diagnostic_kind;

pub use diagnostic_emitter::{
    console_diagnostic_consumer, Diagnostic, DiagnosticConsumer, DiagnosticLocation,
    DiagnosticMessage, NullDiagnosticConsumer, StreamDiagnosticConsumer,
};
pub use diagnostic_kind::{DiagnosticKind, LexerDiagnosticKind};

/// Maps subsystem-specific location handles (token indices, for example) back
/// to locations in the source code.
pub trait DiagnosticLocationTranslator<'s, LocationT> {
    fn get_location(&self, loc: LocationT) -> DiagnosticLocation<'s>;
}
