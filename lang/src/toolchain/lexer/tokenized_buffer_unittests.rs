#[cfg(test)]
mod tests {
    use crate::ink;
    use crate::toolchain::diagnostics::diagnostic_emitter;
    use crate::toolchain::diagnostics::diagnostic_emitter::{Diagnostic, DiagnosticConsumer};
    use crate::toolchain::diagnostics::DiagnosticLocationTranslator;
    use crate::toolchain::source;

    use crate::toolchain::lexer::token::Token;
    use crate::toolchain::lexer::token::TokenKind::*;

    use crate::toolchain::lexer::{LexerOptions, TokenizedBuffer};

    // Lexing helper function to compare expected lexing to the tokens
    // produced from the provided source.
    fn check_lexing(source: &source::SourceBuffer, expect: Vec<Token>) {
        let mut diags = diagnostic_emitter::NullDiagnosticConsumer {};
        let buffer = TokenizedBuffer::tokenize(source, LexerOptions::default(), &mut diags);
        assert_eq!(buffer.tokens(), &expect);
    }

    // Counts diagnostics without printing them.
    struct CountingDiagnosticConsumer {
        count: usize,
    }

    impl DiagnosticConsumer for CountingDiagnosticConsumer {
        fn handle_diagnostic(&mut self, _diag: Diagnostic) {
            self.count += 1;
        }
        fn flush(&mut self) {}
    }

    #[test]
    fn smoke_test() {
        check_lexing(
            ink!("f := (x) => x + 1"),
            vec![
                Token::ident("f", 1, 1),
                Token::new(DefineOp, 1, 4),
                Token::new(LeftParen, 1, 6),
                Token::ident("x", 1, 7),
                Token::new(Separator, 1, 8),
                Token::new(RightParen, 1, 8),
                Token::new(FunctionArrow, 1, 11),
                Token::ident("x", 1, 13),
                Token::new(AddOp, 1, 15),
                Token::number_literal(1.0, 1, 17),
                Token::new(Separator, 1, 18),
            ],
        );
    }

    #[test]
    fn defines() {
        check_lexing(
            ink!("x := 42"),
            vec![
                Token::ident("x", 1, 1),
                Token::new(DefineOp, 1, 4),
                Token::number_literal(42.0, 1, 6),
                Token::new(Separator, 1, 8),
            ],
        );
    }

    #[test]
    fn accessors() {
        check_lexing(
            ink!("a.b 3.14"),
            vec![
                Token::ident("a", 1, 1),
                Token::new(AccessorOp, 1, 2),
                Token::ident("b", 1, 3),
                Token::number_literal(3.14, 1, 5),
                Token::new(Separator, 1, 9),
            ],
        );

        check_lexing(
            ink!("a.b.c"),
            vec![
                Token::ident("a", 1, 1),
                Token::new(AccessorOp, 1, 2),
                Token::ident("b", 1, 3),
                Token::new(AccessorOp, 1, 4),
                Token::ident("c", 1, 5),
                Token::new(Separator, 1, 6),
            ],
        );
    }

    #[test]
    fn numbers() {
        // A trailing decimal point stays in the accumulator and parses as
        // the whole number; a second dot after a fraction is an accessor.
        check_lexing(
            ink!("1. 1.2.3"),
            vec![
                Token::number_literal(1.0, 1, 1),
                Token::number_literal(1.2, 1, 4),
                Token::new(AccessorOp, 1, 7),
                Token::number_literal(3.0, 1, 8),
                Token::new(Separator, 1, 9),
            ],
        );
    }

    #[test]
    fn number_format_errors() {
        // An identifier-looking word starting with a digit commits as a
        // number literal; the failed parse reports one diagnostic and the
        // token flows on with a zero value.
        let mut diags = CountingDiagnosticConsumer { count: 0 };
        let source = ink!("5th := 1");
        let buffer = TokenizedBuffer::tokenize(source, LexerOptions::default(), &mut diags);
        assert_eq!(diags.count, 1);
        assert_eq!(
            buffer.tokens(),
            &vec![
                Token::number_literal(0.0, 1, 1),
                Token::new(DefineOp, 1, 6),
                Token::number_literal(1.0, 1, 8),
                Token::new(Separator, 1, 9),
            ],
        );
    }

    #[test]
    fn booleans() {
        check_lexing(
            ink!("true false truthy"),
            vec![
                Token::new(TrueLiteral, 1, 5),
                Token::new(FalseLiteral, 1, 11),
                Token::ident("truthy", 1, 12),
                Token::new(Separator, 1, 18),
            ],
        );
    }

    #[test]
    fn empty_identifiers() {
        // An underscore is never part of a name.
        check_lexing(
            ink!("_ _abc"),
            vec![
                Token::new(EmptyIdentifier, 1, 1),
                Token::new(EmptyIdentifier, 1, 3),
                Token::ident("abc", 1, 4),
                Token::new(Separator, 1, 7),
            ],
        );
    }

    #[test]
    fn unicode_identifiers() {
        check_lexing(
            ink!("λ := 1"),
            vec![
                Token::ident("λ", 1, 1),
                Token::new(DefineOp, 1, 4),
                Token::number_literal(1.0, 1, 6),
                Token::new(Separator, 1, 7),
            ],
        );
    }

    #[test]
    fn string_escapes() {
        // The rune after a backslash is taken literally, so '\n' holds the
        // letter n, not a line feed.
        check_lexing(
            ink!(r"'hi\n'"),
            vec![Token::string_literal("hin", 1, 1), Token::new(Separator, 1, 7)],
        );

        check_lexing(
            ink!(r"'don\'t'"),
            vec![Token::string_literal("don't", 1, 1), Token::new(Separator, 1, 9)],
        );
    }

    #[test]
    fn multiline_strings() {
        check_lexing(
            ink!("'a\nb'"),
            vec![Token::string_literal("a\nb", 1, 1), Token::new(Separator, 2, 3)],
        );
    }

    #[test]
    fn unterminated_strings() {
        // Content of a string left open at end of input is dropped; the
        // parser observes the truncation.
        check_lexing(
            ink!("x 'abc"),
            vec![Token::ident("x", 1, 1), Token::new(Separator, 1, 7)],
        );
    }

    #[test]
    fn match_clauses() {
        check_lexing(
            ink!("n :: { 1 -> 'a' 2 -> 'b' }"),
            vec![
                Token::ident("n", 1, 1),
                Token::new(MatchColon, 1, 4),
                Token::new(LeftBrace, 1, 6),
                Token::number_literal(1.0, 1, 8),
                Token::new(CaseArrow, 1, 11),
                Token::string_literal("a", 1, 13),
                Token::number_literal(2.0, 1, 17),
                Token::new(CaseArrow, 1, 20),
                Token::string_literal("b", 1, 22),
                Token::new(Separator, 1, 26),
                Token::new(RightBrace, 1, 26),
                Token::new(Separator, 1, 27),
            ],
        );

        // With one clause per line, each line break closes the clause.
        check_lexing(
            ink!("n :: {\n\t1 -> 'a'\n\t2 -> 'b'\n}"),
            vec![
                Token::ident("n", 1, 1),
                Token::new(MatchColon, 1, 4),
                Token::new(LeftBrace, 1, 6),
                Token::number_literal(1.0, 2, 2),
                Token::new(CaseArrow, 2, 5),
                Token::string_literal("a", 2, 7),
                Token::new(Separator, 2, 10),
                Token::number_literal(2.0, 3, 2),
                Token::new(CaseArrow, 3, 5),
                Token::string_literal("b", 3, 7),
                Token::new(Separator, 3, 10),
                Token::new(RightBrace, 4, 1),
                Token::new(Separator, 4, 2),
            ],
        );
    }

    #[test]
    fn block_comments() {
        check_lexing(
            ink!("`block` x\n"),
            vec![Token::ident("x", 1, 8), Token::new(Separator, 1, 9)],
        );

        // A block comment is blank space even across a line break, so no
        // separator interrupts the expression.
        check_lexing(
            ink!("a `multi\nline` b"),
            vec![
                Token::ident("a", 1, 1),
                Token::ident("b", 2, 8),
                Token::new(Separator, 2, 9),
            ],
        );
    }

    #[test]
    fn line_comments() {
        check_lexing(
            ink!("x `` note\ny"),
            vec![
                Token::ident("x", 1, 1),
                Token::new(Separator, 1, 3),
                Token::ident("y", 2, 1),
                Token::new(Separator, 2, 2),
            ],
        );

        // A line comment cut off by end of input still terminates the
        // expression it trails.
        check_lexing(
            ink!("x ``done"),
            vec![Token::ident("x", 1, 1), Token::new(Separator, 1, 3)],
        );
    }

    #[test]
    fn shebangs() {
        check_lexing(
            ink!("#!/usr/bin/env ink\nx"),
            vec![Token::ident("x", 2, 1), Token::new(Separator, 2, 2)],
        );

        check_lexing(ink!("#!ink"), vec![]);
    }

    #[test]
    fn operators() {
        check_lexing(
            ink!("a * b / c % d"),
            vec![
                Token::ident("a", 1, 1),
                Token::new(MultiplyOp, 1, 3),
                Token::ident("b", 1, 5),
                Token::new(DivideOp, 1, 7),
                Token::ident("c", 1, 9),
                Token::new(ModulusOp, 1, 11),
                Token::ident("d", 1, 13),
                Token::new(Separator, 1, 14),
            ],
        );

        check_lexing(
            ink!("a & b | c ^ d"),
            vec![
                Token::ident("a", 1, 1),
                Token::new(LogicalAndOp, 1, 3),
                Token::ident("b", 1, 5),
                Token::new(LogicalOrOp, 1, 7),
                Token::ident("c", 1, 9),
                Token::new(LogicalXorOp, 1, 11),
                Token::ident("d", 1, 13),
                Token::new(Separator, 1, 14),
            ],
        );

        check_lexing(
            ink!("1 < 2 > 0"),
            vec![
                Token::number_literal(1.0, 1, 1),
                Token::new(LessThanOp, 1, 3),
                Token::number_literal(2.0, 1, 5),
                Token::new(GreaterThanOp, 1, 7),
                Token::number_literal(0.0, 1, 9),
                Token::new(Separator, 1, 10),
            ],
        );

        check_lexing(
            ink!("~n"),
            vec![
                Token::new(NegationOp, 1, 1),
                Token::ident("n", 1, 2),
                Token::new(Separator, 1, 3),
            ],
        );
    }

    #[test]
    fn lookahead_operators() {
        // The lookahead rune is counted before the match decides, so the
        // pushed-back path records positions one column ahead.
        check_lexing(
            ink!("a=b"),
            vec![
                Token::ident("a", 1, 2),
                Token::new(EqualOp, 1, 3),
                Token::ident("b", 1, 4),
                Token::new(Separator, 1, 5),
            ],
        );

        check_lexing(
            ink!("x - y"),
            vec![
                Token::ident("x", 1, 1),
                Token::new(SubtractOp, 1, 4),
                Token::ident("y", 1, 6),
                Token::new(Separator, 1, 7),
            ],
        );

        check_lexing(
            ink!("x -> y"),
            vec![
                Token::ident("x", 1, 1),
                Token::new(CaseArrow, 1, 4),
                Token::ident("y", 1, 6),
                Token::new(Separator, 1, 7),
            ],
        );
    }

    #[test]
    fn key_values() {
        // The key expression ends at the colon, so a separator lands ahead
        // of the key-value colon itself.
        check_lexing(
            ink!("{a: 1}"),
            vec![
                Token::new(LeftBrace, 1, 1),
                Token::ident("a", 1, 3),
                Token::new(Separator, 1, 4),
                Token::new(KeyValueSeparator, 1, 4),
                Token::number_literal(1.0, 1, 6),
                Token::new(Separator, 1, 7),
                Token::new(RightBrace, 1, 7),
                Token::new(Separator, 1, 8),
            ],
        );
    }

    #[test]
    fn lists() {
        check_lexing(
            ink!("[1, 2]"),
            vec![
                Token::new(LeftBracket, 1, 1),
                Token::number_literal(1.0, 1, 2),
                Token::new(Separator, 1, 3),
                Token::number_literal(2.0, 1, 5),
                Token::new(Separator, 1, 6),
                Token::new(RightBracket, 1, 6),
                Token::new(Separator, 1, 7),
            ],
        );
    }

    #[test]
    fn dangling_lookahead_at_eof() {
        // A colon with nothing after it never becomes a token; only the
        // flushed identifier and the closing separator remain.
        check_lexing(
            ink!("x :"),
            vec![Token::ident("x", 1, 1), Token::new(Separator, 1, 4)],
        );
    }

    #[test]
    fn empty_input() {
        check_lexing(ink!(""), vec![]);
        check_lexing(ink!("  \n "), vec![]);
    }

    #[test]
    fn no_redundant_separators() {
        let mut diags = diagnostic_emitter::NullDiagnosticConsumer {};
        let source = ink!("a := [1, 2]\nb := a.0 + 1\n`` done\nc := ~b\n");
        let buffer = TokenizedBuffer::tokenize(source, LexerOptions::default(), &mut diags);
        let tokens = buffer.tokens();
        assert!(!tokens.is_empty());
        for pair in tokens.windows(2) {
            assert!(
                !(pair[0].kind == Separator && pair[1].kind == Separator),
                "consecutive separators at {}:{}",
                pair[1].line,
                pair[1].column
            );
        }
        assert_eq!(tokens.last().unwrap().kind, Separator);
    }

    #[test]
    fn line_table() {
        let mut diags = diagnostic_emitter::NullDiagnosticConsumer {};
        let source = ink!("a := 1\nb := 2\n");
        let buffer = TokenizedBuffer::tokenize(source, LexerOptions::default(), &mut diags);
        assert_eq!(buffer.token_at(0), Some(&Token::ident("a", 1, 1)));
        assert_eq!(buffer.token_at(4), Some(&Token::ident("b", 2, 1)));
        assert_eq!(buffer.token_at(99), None);

        let location = buffer.get_location(0);
        assert_eq!(location.line_number, 1);
        assert_eq!(location.column_number, 1);
        assert_eq!(location.line, "a := 1\n");

        let location = buffer.get_location(4);
        assert_eq!(location.line_number, 2);
        assert_eq!(location.column_number, 1);
        assert_eq!(location.line, "b := 2\n");
    }
}
