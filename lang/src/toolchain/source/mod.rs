pub mod source_buffer;

pub use source_buffer::{SourceBuffer, SourceError};

/// Builds a reference to an in-memory [SourceBuffer] from an Ink source
/// string, for tests and benchmarks.
#[macro_export]
macro_rules! ink {
    ($source:expr) => {
        &$crate::toolchain::source::SourceBuffer::new_from_string($source, "<memory>").unwrap()
    };
}
