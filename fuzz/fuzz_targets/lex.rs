#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The lexer is responsible for detecting invalid utf-8 itself, so hand it
    // the raw bytes unchecked.
    let s = unsafe { std::str::from_utf8_unchecked(data) };
    let source =
        ink_lang::toolchain::source::source_buffer::SourceBuffer::new_from_string(s, "fuzz_targets/lex.rs")
            .unwrap();
    let mut diags = ink_lang::toolchain::diagnostics::NullDiagnosticConsumer {};
    let _ = ink_lang::toolchain::lexer::TokenizedBuffer::tokenize(
        &source,
        ink_lang::toolchain::lexer::LexerOptions::default(),
        &mut diags,
    );
});
