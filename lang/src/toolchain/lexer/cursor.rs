use std::collections::VecDeque;

use bstr;
use bstr::ByteSlice;

use crate::toolchain::diagnostics::diagnostic_emitter::Diagnostic;
use crate::toolchain::diagnostics::diagnostic_emitter::DiagnosticConsumer;
use crate::toolchain::diagnostics::diagnostic_emitter::DiagnosticLevel;
use crate::toolchain::diagnostics::diagnostic_emitter::DiagnosticMessage;
use crate::toolchain::diagnostics::diagnostic_kind::*;
use crate::toolchain::diagnostics::DiagnosticLocation;
use crate::toolchain::source::SourceBuffer;

use super::token::Token;
use super::token::TokenKind;

/// Behavior switches for a single lexer invocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexerOptions {
    /// Terminate the process after reporting a syntax error, instead of
    /// continuing the scan.
    pub fatal_errors: bool,

    /// Trace each token to stderr as it is committed.
    pub debug_tokens: bool,
}

/// Streaming token iterator over a SourceBuffer.
///
/// Also tracks input buffer position by line and column, and collects the
/// text of completed lines for diagnostic location translation.
///
/// The scan is a single pass with one rune of lookahead. Pending identifier
/// and string characters accumulate in buffers that commit on the next
/// structural rune, so one input rune can complete several tokens at once;
/// those queue in order and drain through the iterator.
pub struct Cursor<'s, 'v, 'd> {
    source: &'s SourceBuffer<'s>,
    // An iterator over the input character string.
    chars: bstr::Chars<'s>,
    line: i32,
    col: i32,

    // Pending identifier/number accumulator.
    buf: String,
    // Active string literal accumulator and the position of its opening
    // quote.
    strbuf: String,
    strbuf_start_line: i32,
    strbuf_start_col: i32,
    in_string: bool,

    // Kind of the most recently committed token, which decides whether a
    // line break or closing bracket synthesizes a Separator.
    last_kind: TokenKind,

    // Tokens committed but not yet pulled through the iterator.
    ready: VecDeque<Token>,

    options: LexerOptions,
    started: bool,
    done: bool,

    line_str: &'s bstr::BStr,
    line_bytes_remaining: usize,
    lines: &'v mut Vec<&'s str>,
    diags: &'d mut dyn DiagnosticConsumer,
}

impl<'s, 'v, 'd> Iterator for Cursor<'s, 'v, 'd> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(tok) = self.ready.pop_front() {
                return Some(tok);
            }
            if self.done {
                return None;
            }
            if !self.started {
                self.started = true;
                self.skip_shebang();
                continue;
            }

            match self.bump() {
                Some(c) => {
                    self.scan(c);
                    self.col += 1;
                }
                None => {
                    self.done = true;
                    self.ensure_separator();
                }
            }
        }
    }
}

impl<'s, 'v, 'd> Cursor<'s, 'v, 'd> {
    pub const EOF: char = '\0';

    /// The bstr::Chars iterator substitutes invalid utf-8 sequences with the
    /// utf-8 placeholder character U+FFFD. We treat the presence of this
    /// character as a signifier that the source string has invalid utf-8
    /// characters. As rust requires &str elements to always contain valid
    /// utf-8 only, this is necessarily a fatal lexing error.
    pub const BAD: char = '\u{fffd}';

    pub fn new(
        source: &'s SourceBuffer<'s>,
        options: LexerOptions,
        lines: &'v mut Vec<&'s str>,
        diags: &'d mut impl DiagnosticConsumer,
    ) -> Cursor<'s, 'v, 'd> {
        let input = source.code();
        Cursor {
            source,
            chars: input.chars(),
            line: 1,
            col: 1,

            buf: String::new(),
            strbuf: String::new(),
            strbuf_start_line: 0,
            strbuf_start_col: 0,
            in_string: false,

            last_kind: TokenKind::Separator,

            ready: VecDeque::new(),

            options,
            started: false,
            done: false,

            line_str: input,
            line_bytes_remaining: input.len(),
            lines,
            diags,
        }
    }

    /// A `#!` prefix starts a shebang line; discard through the line end and
    /// count the line, producing no token.
    fn skip_shebang(&mut self) {
        if !self.chars.as_bytes().starts_with(b"#!") {
            return;
        }
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
        self.line += 1;
    }

    /// One step of the scan. `c` was just consumed and `self.col` is its
    /// column, except after a pushed-back lookahead rune, where the counter
    /// runs one ahead exactly as the committed positions record it.
    fn scan(&mut self, c: char) {
        match c {
            '\'' => {
                if self.in_string {
                    let tok = Token {
                        kind: TokenKind::StringLiteral,
                        string: std::mem::take(&mut self.strbuf),
                        number: 0.0,
                        line: self.strbuf_start_line,
                        column: self.strbuf_start_col,
                    };
                    self.commit(tok);
                } else {
                    self.strbuf.clear();
                    self.strbuf_start_line = self.line;
                    self.strbuf_start_col = self.col;
                }
                self.in_string = !self.in_string;
            }
            _ if self.in_string => {
                if c == '\n' {
                    self.line += 1;
                    self.col = 0;
                    self.strbuf.push(c);
                } else if c == '\\' {
                    // Minimal escape semantics: whatever rune follows the
                    // backslash is taken literally.
                    let Some(escaped) = self.bump() else {
                        return;
                    };
                    self.strbuf.push(escaped);
                    self.col += 1;
                } else {
                    self.strbuf.push(c);
                }
            }
            '`' => {
                let Some(mut next) = self.bump() else {
                    return;
                };

                if next == '`' {
                    // Single-line comment, keep taking until EOL. The line
                    // break it swallows still terminates the expression.
                    while next != '\n' {
                        match self.bump() {
                            Some(ch) => next = ch,
                            None => break,
                        }
                    }
                    self.ensure_separator();
                    self.line += 1;
                    self.col = 0;
                } else {
                    // Block comment, keep taking until the closing backtick.
                    // Treated as blank space, no separator.
                    while next != '`' {
                        match self.bump() {
                            Some(ch) => next = ch,
                            None => break,
                        }
                        if next == '\n' {
                            self.line += 1;
                            self.col = 0;
                        }
                        self.col += 1;
                    }
                }
            }
            '\n' => {
                self.ensure_separator();
                self.line += 1;
                self.col = 0;
            }
            _ if c.is_whitespace() => self.commit_clear(),
            '_' => self.commit_char(TokenKind::EmptyIdentifier),
            '~' => self.commit_char(TokenKind::NegationOp),
            '+' => self.commit_char(TokenKind::AddOp),
            '*' => self.commit_char(TokenKind::MultiplyOp),
            '/' => self.commit_char(TokenKind::DivideOp),
            '%' => self.commit_char(TokenKind::ModulusOp),
            '&' => self.commit_char(TokenKind::LogicalAndOp),
            '|' => self.commit_char(TokenKind::LogicalOrOp),
            '^' => self.commit_char(TokenKind::LogicalXorOp),
            '<' => self.commit_char(TokenKind::LessThanOp),
            '>' => self.commit_char(TokenKind::GreaterThanOp),
            ',' => self.commit_char(TokenKind::Separator),
            '.' => {
                // The only non-accessor reading is [digits] . [digits], so
                // a dot after anything but an all-digit pending buffer is an
                // accessor. Numbers must therefore start with a digit: .5 is
                // not 0.5 but a syntax error.
                if self.buf.is_empty() || !self.buf.chars().all(|d| d.is_numeric()) {
                    self.commit_char(TokenKind::AccessorOp);
                } else {
                    self.buf.push('.');
                }
            }
            ':' => {
                if self.is_eof() {
                    return;
                }
                self.col += 1;
                match self.first() {
                    '=' => {
                        self.bump();
                        self.commit_char(TokenKind::DefineOp);
                    }
                    ':' => {
                        self.bump();
                        self.commit_char(TokenKind::MatchColon);
                    }
                    _ => {
                        // The key was parsed as an expression, so mark the
                        // expression end before the separator itself.
                        self.ensure_separator();
                        self.commit_char(TokenKind::KeyValueSeparator);
                    }
                }
            }
            '=' => {
                if self.is_eof() {
                    return;
                }
                self.col += 1;
                if self.first() == '>' {
                    self.bump();
                    self.commit_char(TokenKind::FunctionArrow);
                } else {
                    self.commit_char(TokenKind::EqualOp);
                }
            }
            '-' => {
                if self.is_eof() {
                    return;
                }
                self.col += 1;
                if self.first() == '>' {
                    self.bump();
                    self.commit_char(TokenKind::CaseArrow);
                } else {
                    self.commit_char(TokenKind::SubtractOp);
                }
            }
            '(' => self.commit_char(TokenKind::LeftParen),
            ')' => {
                self.ensure_separator();
                self.commit_char(TokenKind::RightParen);
            }
            '[' => self.commit_char(TokenKind::LeftBracket),
            ']' => {
                self.ensure_separator();
                self.commit_char(TokenKind::RightBracket);
            }
            '{' => self.commit_char(TokenKind::LeftBrace),
            '}' => {
                self.ensure_separator();
                self.commit_char(TokenKind::RightBrace);
            }
            _ => self.buf.push(c),
        }
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(Self::EOF)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_bytes().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.chars.next();
        match next {
            None => {
                if !self.line_str.is_empty() {
                    // We are confident that line_str is valid utf-8 because
                    // we have just checked every code point for validity
                    // while scanning.
                    let line_str = unsafe { self.line_str.to_str_unchecked() };
                    self.lines.push(line_str);
                    self.line_str = bstr::BStr::new(&[]);
                }
                None
            }
            Some(c) if c == Self::BAD => {
                let location = DiagnosticLocation {
                    file_name: self.source.file_name(),
                    line_number: self.line,
                    column_number: self.col,
                    line: "",
                };
                let msg = DiagnosticMessage {
                    kind: DiagnosticKind::LexerError { kind: LexerDiagnosticKind::InvalidUtf8 },
                    location,
                    body: String::from("invalid utf-8 sequence, input truncated"),
                };
                let diag = Diagnostic::new(DiagnosticLevel::Error, msg, Vec::new());
                self.diags.handle_diagnostic(diag);
                // Invalidate the chars iterator, this is the end of the
                // stream. The rest of the line is not known to be utf-8, so
                // drop it from the line table too.
                self.chars = bstr::BStr::new(&[]).chars();
                self.line_str = bstr::BStr::new(&[]);
                None
            }
            Some(c) => {
                if c == '\n' {
                    // Extract the substring for the line we just terminated.
                    let new_bytes_remaining = self.chars.as_bytes().len();
                    let (prefix, suffix) =
                        self.line_str.split_at(self.line_bytes_remaining - new_bytes_remaining);

                    // We just checked every code point in prefix for validity
                    // so this does not break the requirement that a &str must
                    // always reference valid utf-8.
                    let prefix_str = unsafe { prefix.to_str_unchecked() };

                    self.lines.push(prefix_str);
                    self.line_str = bstr::BStr::new(suffix);
                    self.line_bytes_remaining = new_bytes_remaining;
                }
                Some(c)
            }
        }
    }

    fn simple_commit(&mut self, tok: Token) {
        self.last_kind = tok.kind;
        if self.options.debug_tokens {
            eprintln!("lex -> {}", tok);
        }
        self.ready.push_back(tok);
    }

    fn simple_commit_char(&mut self, kind: TokenKind) {
        self.simple_commit(Token::new(kind, self.line, self.col));
    }

    /// Commits the pending accumulator, if any, as a boolean literal, number
    /// literal, or identifier.
    fn commit_clear(&mut self) {
        if self.buf.is_empty() {
            // No need to commit an empty token.
            return;
        }

        let cbuf = std::mem::take(&mut self.buf);
        match cbuf.as_str() {
            "true" => self.simple_commit_char(TokenKind::TrueLiteral),
            "false" => self.simple_commit_char(TokenKind::FalseLiteral),
            _ => {
                let start_col = self.col - cbuf.chars().count() as i32;
                if cbuf.as_bytes()[0].is_ascii_digit() {
                    let number = match cbuf.parse::<f64>() {
                        Ok(n) => n,
                        Err(err) => {
                            self.number_format_error(&err);
                            // The malformed literal still flows downstream,
                            // carrying an unexceptional zero.
                            0.0
                        }
                    };
                    self.simple_commit(Token::number_literal(number, self.line, start_col));
                } else {
                    self.simple_commit(Token {
                        kind: TokenKind::Identifier,
                        string: cbuf,
                        number: 0.0,
                        line: self.line,
                        column: start_col,
                    });
                }
            }
        }
    }

    fn commit(&mut self, tok: Token) {
        self.commit_clear();
        self.simple_commit(tok);
    }

    fn commit_char(&mut self, kind: TokenKind) {
        self.commit(Token::new(kind, self.line, self.col));
    }

    /// Synthesizes a Separator unless the last token clearly expects a
    /// continuation of the expression.
    fn ensure_separator(&mut self) {
        self.commit_clear();
        if !expects_continuation(self.last_kind) {
            self.commit_char(TokenKind::Separator);
        }
    }

    fn number_format_error(&mut self, err: &std::num::ParseFloatError) {
        let location = DiagnosticLocation {
            file_name: self.source.file_name(),
            line_number: self.line,
            column_number: self.col,
            line: "",
        };
        let msg = DiagnosticMessage {
            kind: DiagnosticKind::LexerError { kind: LexerDiagnosticKind::NumberFormat },
            location,
            body: format!("parsing error in number at {}:{}, {}", self.line, self.col, err),
        };
        self.diags.handle_diagnostic(Diagnostic::new(DiagnosticLevel::Error, msg, Vec::new()));
        if self.options.fatal_errors {
            self.diags.flush();
            std::process::exit(1);
        }
    }
}

/// Kinds after which a line break or closing bracket does not terminate the
/// expression. Any change to the operator set must revisit this table.
fn expects_continuation(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Separator
            | TokenKind::LeftParen
            | TokenKind::LeftBracket
            | TokenKind::LeftBrace
            | TokenKind::AddOp
            | TokenKind::SubtractOp
            | TokenKind::MultiplyOp
            | TokenKind::DivideOp
            | TokenKind::ModulusOp
            | TokenKind::NegationOp
            | TokenKind::GreaterThanOp
            | TokenKind::LessThanOp
            | TokenKind::EqualOp
            | TokenKind::DefineOp
            | TokenKind::AccessorOp
            | TokenKind::KeyValueSeparator
            | TokenKind::FunctionArrow
            | TokenKind::MatchColon
            | TokenKind::CaseArrow
    )
}
