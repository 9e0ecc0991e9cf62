#[cfg(test)]
mod lexer_tests {
    use imp_frontend as imp;

    use imp::error::FrontendError;
    use imp::lexer::*;
    use imp::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenKind, &str)]) {
        let tokens: Vec<Token<'_>> = tokenize(source).expect("source should tokenize");

        assert_eq!(
            tokens.len(),
            expected.len(),
            "token count mismatch: {:?}",
            tokens
        );

        for (actual, (expected_kind, expected_text)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.kind, *expected_kind, "kind of {:?}", actual);
            assert_eq!(actual.text, *expected_text);
        }
    }

    fn positions(source: &str) -> Vec<(&str, usize, usize)> {
        tokenize(source)
            .expect("source should tokenize")
            .into_iter()
            .map(|t| (t.text, t.line, t.column))
            .collect()
    }

    #[test]
    fn test_structural_tokens() {
        assert_token_sequence(
            ";:,(){}",
            &[
                (TokenKind::Semicolon, ";"),
                (TokenKind::Colon, ":"),
                (TokenKind::Comma, ","),
                (TokenKind::LeftParen, "("),
                (TokenKind::RightParen, ")"),
                (TokenKind::LeftBrace, "{"),
                (TokenKind::RightBrace, "}"),
            ],
        );
    }

    #[test]
    fn test_operators_are_single_tokens() {
        assert_token_sequence(
            "-> == != <= >= < > + - * /",
            &[
                (TokenKind::Assign, "->"),
                (TokenKind::Relational, "=="),
                (TokenKind::Relational, "!="),
                (TokenKind::Relational, "<="),
                (TokenKind::Relational, ">="),
                (TokenKind::Relational, "<"),
                (TokenKind::Relational, ">"),
                (TokenKind::Arithmetic, "+"),
                (TokenKind::Arithmetic, "-"),
                (TokenKind::Arithmetic, "*"),
                (TokenKind::Arithmetic, "/"),
            ],
        );
    }

    #[test]
    fn test_arrow_without_spaces() {
        assert_token_sequence(
            "a->b",
            &[
                (TokenKind::Identifier, "a"),
                (TokenKind::Assign, "->"),
                (TokenKind::Identifier, "b"),
            ],
        );

        assert_token_sequence(
            "x<=-1",
            &[
                (TokenKind::Identifier, "x"),
                (TokenKind::Relational, "<="),
                (TokenKind::Arithmetic, "-"),
                (TokenKind::Integer, "1"),
            ],
        );
    }

    #[test]
    fn test_numbers() {
        assert_token_sequence(
            "3.14 42 0 100.5",
            &[
                (TokenKind::Float, "3.14"),
                (TokenKind::Integer, "42"),
                (TokenKind::Integer, "0"),
                (TokenKind::Float, "100.5"),
            ],
        );
    }

    #[test]
    fn test_trailing_dot_is_not_a_float() {
        let err = tokenize("7.").unwrap_err();

        assert!(matches!(
            err,
            FrontendError::Lex {
                character: '.',
                line: 1,
                column: 2
            }
        ));
    }

    #[test]
    fn test_strings_keep_their_quotes() {
        assert_token_sequence(
            r#""hello world" "" "a"b"#,
            &[
                (TokenKind::String, "\"hello world\""),
                (TokenKind::String, "\"\""),
                (TokenKind::String, "\"a\""),
                (TokenKind::Identifier, "b"),
            ],
        );
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let err = tokenize("Imp \"abc").unwrap_err();

        assert!(matches!(
            err,
            FrontendError::Lex {
                character: '"',
                line: 1,
                column: 5
            }
        ));
    }

    #[test]
    fn test_keywords_and_identifier_boundaries() {
        assert_token_sequence(
            "dum dumx si2 Imp_ var: velsi nisi per fin fnc back Imp sim",
            &[
                (TokenKind::Keyword, "dum"),
                (TokenKind::Identifier, "dumx"),
                (TokenKind::Identifier, "si2"),
                (TokenKind::Identifier, "Imp_"),
                (TokenKind::Keyword, "var"),
                (TokenKind::Colon, ":"),
                (TokenKind::Keyword, "velsi"),
                (TokenKind::Keyword, "nisi"),
                (TokenKind::Keyword, "per"),
                (TokenKind::Keyword, "fin"),
                (TokenKind::Keyword, "fnc"),
                (TokenKind::Keyword, "back"),
                (TokenKind::Keyword, "Imp"),
                (TokenKind::Identifier, "sim"),
            ],
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_token_sequence(
            "imp Dum IMP",
            &[
                (TokenKind::Identifier, "imp"),
                (TokenKind::Identifier, "Dum"),
                (TokenKind::Identifier, "IMP"),
            ],
        );
    }

    #[test]
    fn test_every_keyword_is_classified() {
        for (spelling, keyword) in KEYWORDS.entries() {
            let tokens = tokenize(spelling).unwrap();

            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].kind, TokenKind::Keyword, "{}", spelling);
            assert_eq!(tokens[0].keyword(), Some(*keyword));
        }
    }

    #[test]
    fn test_keyword_tokens_match_keyword_map() {
        let source = "fnc var back si velsi nisi dum per Imp fin sii vars imp fnc_ dum2 x";
        let tokens = tokenize(source).unwrap();

        assert_eq!(tokens.len(), 16);

        for token in &tokens {
            assert_eq!(
                token.kind == TokenKind::Keyword,
                KEYWORDS.contains_key(token.text),
                "{}",
                token
            );
        }

        let keyword_count = tokens.iter().filter(|t| t.kind == TokenKind::Keyword).count();
        assert_eq!(keyword_count, KEYWORDS.len());
    }

    #[test]
    fn test_identifier_has_no_keyword() {
        let tokens = tokenize("dumx").unwrap();

        assert_eq!(tokens[0].keyword(), None);
        assert!(!tokens[0].is_keyword(Keyword::Dum));
    }

    #[test]
    fn test_line_and_column_tracking() {
        assert_eq!(
            positions("var: x -> 1;\n  Imp x;"),
            vec![
                ("var", 1, 1),
                (":", 1, 4),
                ("x", 1, 6),
                ("->", 1, 8),
                ("1", 1, 11),
                (";", 1, 12),
                ("Imp", 2, 3),
                ("x", 2, 7),
                (";", 2, 8),
            ]
        );
    }

    #[test]
    fn test_line_counts_every_newline() {
        assert_eq!(positions("\n\n\nx"), vec![("x", 4, 1)]);
    }

    #[test]
    fn test_tabs_count_as_one_column() {
        assert_eq!(positions("\tx\t y"), vec![("x", 1, 2), ("y", 1, 5)]);
    }

    #[test]
    fn test_comments_are_skipped_but_counted() {
        assert_eq!(
            positions("a // comment -> @ here\nb//x\n c"),
            vec![("a", 1, 1), ("b", 2, 1), ("c", 3, 2)]
        );
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        assert_eq!(
            positions("\"olá\" x"),
            vec![("\"olá\"", 1, 1), ("x", 1, 7)]
        );
    }

    #[test]
    fn test_invalid_character_reports_position() {
        let err = tokenize("Imp 1;\n  @").unwrap_err();

        assert!(matches!(
            err,
            FrontendError::Lex {
                character: '@',
                line: 2,
                column: 3
            }
        ));
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.column(), Some(3));
        assert_eq!(err.to_string(), "[line 2, column 3] Error: invalid token '@'");
    }

    #[test]
    fn test_single_equals_is_invalid() {
        let err = tokenize("x = 1").unwrap_err();

        assert!(matches!(
            err,
            FrontendError::Lex {
                character: '=',
                line: 1,
                column: 3
            }
        ));
    }

    #[test]
    fn test_lexer_is_lazy_and_stops_after_error() {
        let mut lexer = Lexer::new("a @ b");

        let first = lexer.next().unwrap().unwrap();
        assert_eq!(first.text, "a");

        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_reports_scan_position() {
        let mut lexer = Lexer::new("ab\n  cd @");

        assert_eq!((lexer.line(), lexer.column()), (1, 1));

        lexer.next().unwrap().unwrap();
        assert_eq!((lexer.line(), lexer.column()), (1, 3));

        lexer.next().unwrap().unwrap();
        assert_eq!((lexer.line(), lexer.column()), (2, 5));

        assert!(lexer.next().unwrap().is_err());
        assert_eq!((lexer.line(), lexer.column()), (2, 6));
    }

    #[test]
    fn test_lexer_is_fused_after_input_ends() {
        let mut lexer = Lexer::new("x");

        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \t\n\n // only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_no_trivia_tokens_are_emitted() {
        let tokens = tokenize("a\n b // c\n").unwrap();

        assert!(tokens.iter().all(|t| !matches!(
            t.kind,
            TokenKind::Newline | TokenKind::Whitespace | TokenKind::Comment
        )));
    }

    #[test]
    fn test_sample_program_token_count() {
        let source = "fnc soma(a, b) { var: res -> a + b; back res; }\nImp soma(2, 3);\n";
        let tokens = tokenize(source).unwrap();

        assert_eq!(tokens.len(), 28);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[20].text, "Imp");
        assert_eq!((tokens[20].line, tokens[20].column), (2, 1));
        assert_eq!(tokens[27].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize("fnc soma").unwrap();

        assert_eq!(tokens[0].to_string(), "KEYWORD fnc 1:1");
        assert_eq!(tokens[1].to_string(), "IDENTIFIER soma 1:5");
    }

    #[test]
    fn test_rule_table_order() {
        let order: Vec<TokenKind> = RULES.iter().map(|rule| rule.kind).collect();
        let position = |kind: TokenKind| order.iter().position(|k| *k == kind).unwrap();

        assert!(position(TokenKind::Float) < position(TokenKind::Integer));
        assert!(position(TokenKind::Assign) < position(TokenKind::Arithmetic));
        assert!(position(TokenKind::Keyword) < position(TokenKind::Identifier));
        assert_eq!(order.last(), Some(&TokenKind::Mismatch));
    }
}
