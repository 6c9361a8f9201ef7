use std::fs::File;

use bstr::BStr;
use thiserror::Error;

/// Failure to make source code available for lexing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open source file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to map source file: {0}")]
    Mmap(#[from] mmap_rs::Error),
}

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { string: &'a str },
}

/// Keeps source code and a display name in the same object, so both provide
/// the same lifetimes.
///
/// File-backed buffers are memory-mapped and nothing checks that their bytes
/// are valid utf-8; the lexer detects and reports invalid sequences.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'a>, SourceError> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let buffer =
            unsafe { mmap_rs::MmapOptions::new(len as usize)?.with_file(file, 0).map()? };
        let file_name = file_path.display().to_string();
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> Result<SourceBuffer<'a>, SourceError> {
        let file_name = String::from(name);
        Ok(SourceBuffer { kind: SourceBufferKind::Memory { string }, file_name })
    }

    pub fn code(&self) -> &BStr {
        match &self.kind {
            SourceBufferKind::File { buffer } => BStr::new(buffer.as_slice()),
            SourceBufferKind::Memory { string } => BStr::new(string.as_bytes()),
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}
