//! Lexer for the Rill pipeline language
//!
//! Handles tokenization including:
//! - Keywords and identifiers (`read-file`, `valid?`, `save!`)
//! - Numbers, strings with `{expr}` interpolation
//! - Operators and punctuation (`|>`, `->`, `!=`, ...)
//! - Line comments (`#`) and nesting block comments (`/* ... */`)
//! - Significant indentation (INDENT/NEWLINE/DEDENT tokens)
//! - Implicit line continuation inside brackets
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, StringPart, IndentFrame)
//! - `strings` - String and interpolation scanning
//! - `numbers` - Numeric literal scanning
//! - `indent` - Indentation tracking

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use strings::{MAX_INTERPOLATION_DEPTH, escape};
pub use tokens::{IndentFrame, StringPart, Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use rill_core::lang::operators::OperatorId;
use rill_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Lexer state diagram (simplified):
//
// [Start of line] → measure prefix → compare with top frame → [Inside code]
//                                                                  ↓
//                                                   see '(' → [push bracket]
//                                                                  ↓
//                                        see '\n' → skip (inside brackets)
//                                                                  ↓
//                                                    see ')' → [pop bracket]
// ============================================================================

/// Lexer for Rill source code.
///
/// Scan errors are collected and scanning continues, so one pass reports every malformed literal, stray character
/// and bad indentation transition in the input.
pub struct Lexer<'a> {
    source: &'a str,
    /// Absolute offset this lexer starts reading at (non-zero for interpolation sub-lexers).
    base: usize,
    /// Absolute offset one past the last byte this lexer may read.
    limit: usize,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line_starts: Vec<usize>,
    indent_stack: Vec<IndentFrame>,
    at_line_start: bool,
    /// Open brackets; layout is suppressed while non-empty.
    brackets: Vec<(PunctuationId, Span)>,
    /// Interpolation sub-lexers produce no layout tokens.
    embedded: bool,
    /// How many interpolations enclose this lexer's text.
    nesting: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self::over(source, 0, source.len(), None)
    }

    /// Lexer over `source[start..end]` whose spans stay relative to the whole of `source`.
    fn embedded(source: &'a str, start: usize, end: usize, nesting: usize) -> Self {
        Self::over(source, start, end, Some(nesting))
    }

    fn over(source: &'a str, start: usize, end: usize, nesting: Option<usize>) -> Self {
        let embedded = nesting.is_some();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            base: start,
            limit: end,
            chars: source[start..end].char_indices().peekable(),
            current_pos: start,
            line_starts,
            indent_stack: vec![IndentFrame::base()],
            at_line_start: !embedded,
            brackets: Vec::new(),
            embedded,
            nesting: nesting.unwrap_or(0),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or every scan error on failure. The token stream always ends with an
    /// `Eof` token, preceded by a `Newline` closing the last logical line and one `Dedent` per open frame.
    pub fn tokenize(self) -> Result<Vec<Token>, Vec<CompileError>> {
        let (tokens, errors) = self.run();
        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    fn run(mut self) -> (Vec<Token>, Vec<CompileError>) {
        while !self.is_at_end() {
            self.scan_token();
        }

        if !self.embedded {
            if !self.at_line_start {
                self.add_token(TokenKind::Newline, self.current_pos);
            }
            self.close_frames();
        }

        self.add_token(TokenKind::Eof, self.current_pos);
        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current_pos..self.limit].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = self.base + pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// 1-based line and character column of a byte offset.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&s| s <= offset);
        let line_start = self.line_starts.get(line.wrapping_sub(1)).copied().unwrap_or(0);
        let column = self.source[line_start..offset].chars().count() + 1;
        (line, column)
    }

    fn span_between(&self, start: usize, end: usize) -> Span {
        let (line, column) = self.locate(start);
        Span::new(start, end, line, column)
    }

    fn span_from(&self, start: usize) -> Span {
        self.span_between(start, self.current_pos)
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        let span = self.span_from(start);
        self.errors.push(CompileError::scan(message, span));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Handle indentation at line start
        if self.at_line_start && self.brackets.is_empty() {
            self.handle_indentation();
            return;
        }

        // Skip whitespace (but not newlines)
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Comments
            '#' => self.skip_line_comment(),
            '/' if self.peek() == Some('*') => {
                self.advance();
                self.skip_block_comment(start);
            }

            // Newlines
            '\n' => {
                // Implicit line continuation: skip newlines inside brackets
                if !self.brackets.is_empty() {
                    return;
                }
                self.add_token(TokenKind::Newline, start);
                self.at_line_start = true;
            }

            // Operators and punctuation
            '+' => self.add_op(OperatorId::Plus, start),
            '*' => self.add_op(OperatorId::Star, start),
            '/' => self.add_op(OperatorId::Slash, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '=' => self.add_op(OperatorId::Eq, start),
            '-' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::Arrow, start);
                } else {
                    self.add_op(OperatorId::Minus, start);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.error("unexpected character `!`", start);
                }
            }
            '<' => self.operator(start, OperatorId::Lt, OperatorId::LtEq),
            '>' => self.operator(start, OperatorId::Gt, OperatorId::GtEq),
            '|' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::PipeArrow, start);
                } else {
                    self.add_punct(PunctuationId::Bar, start);
                }
            }
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '(' => self.open_bracket(PunctuationId::LParen, start),
            ')' => self.close_bracket(PunctuationId::RParen, start),
            '[' => self.open_bracket(PunctuationId::LBracket, start),
            ']' => self.close_bracket(PunctuationId::RBracket, start),
            '{' => self.open_bracket(PunctuationId::LBrace, start),
            '}' => self.close_bracket(PunctuationId::RBrace, start),
            '_' => {
                if self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                    while self.peek().is_some_and(is_ident_continue) {
                        self.advance();
                    }
                    let spelling = &self.source[start..self.current_pos];
                    let message = format!("invalid identifier `{spelling}`: identifiers must start with a letter");
                    self.error(message, start);
                } else {
                    self.add_punct(PunctuationId::Underscore, start);
                }
            }

            // Strings
            '"' => self.scan_string(start),

            // Numbers
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            _ if c.is_ascii_alphabetic() => self.scan_identifier(start),

            _ => self.error(format!("unexpected character `{c}`"), start),
        }
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let span = self.span_from(start);
        self.tokens.push(Token::new(kind, span));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// `simple`, or `with_eq` when followed by `=`.
    fn operator(&mut self, start: usize, simple: OperatorId, with_eq: OperatorId) {
        if self.match_char('=') {
            self.add_op(with_eq, start);
        } else {
            self.add_op(simple, start);
        }
    }

    /// Emit a bracket token and remember it for continuation and matching.
    fn open_bracket(&mut self, kind: PunctuationId, start: usize) {
        let span = self.span_from(start);
        self.brackets.push((kind, span));
        self.add_punct(kind, start);
    }

    /// Emit a closing bracket token, checking it against the innermost open bracket.
    fn close_bracket(&mut self, kind: PunctuationId, start: usize) {
        let close = punctuation::as_str(kind);
        match self.brackets.pop() {
            None => self.error(format!("unmatched closing bracket `{close}`"), start),
            Some((open, open_span)) if punctuation::closing_for(open) != Some(kind) => {
                let span = self.span_from(start);
                self.errors.push(
                    CompileError::scan(format!("mismatched closing bracket `{close}`"), span)
                        .with_label(open_span, format!("`{}` opened here", punctuation::as_str(open))),
                );
            }
            Some(_) => {}
        }
        self.add_punct(kind, start);
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a block comment whose `/*` starts at `start` and has been consumed. Block comments nest.
    fn skip_block_comment(&mut self, start: usize) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                None => {
                    self.error("unterminated block comment", start);
                    return;
                }
                Some('/') if self.peek() == Some('*') => {
                    self.advance();
                    depth += 1;
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    depth -= 1;
                }
                Some(_) => {}
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        if matches!(self.peek(), Some('?' | '!')) {
            self.advance();
        }

        let spelling = &self.source[start..self.current_pos];

        // Look up identifier spelling in the reserved-word registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            let name = spelling.to_string();
            self.add_token(TokenKind::Ident(name), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Whether `s` would scan as a single identifier token: `[a-zA-Z][a-zA-Z0-9_-]*[?!]?` and not a reserved word.
pub fn is_identifier(s: &str) -> bool {
    let body = s.strip_suffix(['?', '!']).unwrap_or(s);
    let mut chars = body.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_ok && chars.all(is_ident_continue) && keyword_id(s).is_none()
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .unwrap_or_else(|errs| panic!("lex({source:?}) failed: {errs:?}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn errors(source: &str) -> Vec<CompileError> {
        lex(source).expect_err("expected scan errors")
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(name.to_string())
    }

    #[test]
    fn test_keyword_registry_parity() {
        use rill_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let tokens = kinds(k.canonical);
            assert_eq!(
                tokens,
                vec![TokenKind::Keyword(k.id), TokenKind::Newline, TokenKind::Eof],
                "keyword {:?}",
                k.id
            );
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        use rill_core::lang::operators;

        for o in operators::OPERATORS {
            let tokens = kinds(o.canonical);
            assert_eq!(tokens.len(), 3, "operator {:?}: {tokens:?}", o.id);
            if o.is_keyword_spelling {
                // Word operators are lexed as keywords.
                assert_eq!(tokens[0].infix_operator(), Some(o.id));
                assert!(matches!(tokens[0], TokenKind::Keyword(_)));
            } else {
                assert!(tokens[0].is_operator(o.id), "operator {:?}: {tokens:?}", o.id);
            }
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for p in punctuation::PUNCTUATION {
            // Closing delimiters error when unmatched; lex them as a matching pair.
            let source = match p.id {
                PunctuationId::LParen | PunctuationId::RParen => "()",
                PunctuationId::LBracket | PunctuationId::RBracket => "[]",
                PunctuationId::LBrace | PunctuationId::RBrace => "{}",
                _ => p.canonical,
            };
            let tokens = kinds(source);
            assert!(
                tokens.iter().any(|t| t.is_punctuation(p.id)),
                "lex({source:?}) did not produce {:?}: {tokens:?}",
                p.id
            );
        }
    }

    #[test]
    fn test_longest_match_symbols() {
        assert_eq!(
            kinds("|> | -> - != <= >= < >"),
            vec![
                TokenKind::Punctuation(PunctuationId::PipeArrow),
                TokenKind::Punctuation(PunctuationId::Bar),
                TokenKind::Punctuation(PunctuationId::Arrow),
                TokenKind::Operator(OperatorId::Minus),
                TokenKind::Operator(OperatorId::NotEq),
                TokenKind::Operator(OperatorId::LtEq),
                TokenKind::Operator(OperatorId::GtEq),
                TokenKind::Operator(OperatorId::Lt),
                TokenKind::Operator(OperatorId::Gt),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_shapes() {
        assert_eq!(
            kinds("read-file valid? save! user_2"),
            vec![
                ident("read-file"),
                ident("valid?"),
                ident("save!"),
                ident("user_2"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("read-file"));
        assert!(is_identifier("empty?"));
        assert!(!is_identifier("-user"));
        assert!(!is_identifier("---"));
        assert!(!is_identifier("123user"));
        assert!(!is_identifier("_x"));
        assert!(!is_identifier("match"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_leading_hyphen_is_minus() {
        assert_eq!(
            kinds("-user"),
            vec![
                TokenKind::Operator(OperatorId::Minus),
                ident("user"),
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_underscore_forms() {
        assert_eq!(
            kinds("_.age _"),
            vec![
                TokenKind::Punctuation(PunctuationId::Underscore),
                TokenKind::Punctuation(PunctuationId::Dot),
                ident("age"),
                TokenKind::Punctuation(PunctuationId::Underscore),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        let errs = errors("_private");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("must start with a letter"));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_numbers() {
        let tokens = kinds("42 3.14");
        assert_eq!(tokens[0], TokenKind::Number(42.0));
        assert!(matches!(tokens[1], TokenKind::Number(f) if (f - 3.14).abs() < 1e-9));
    }

    #[test]
    fn test_second_decimal_point_is_error() {
        let errs = errors("12.34.56");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, crate::diagnostics::ErrorKind::Scan);
        assert_eq!((errs[0].span.start, errs[0].span.end), (0, 8));
    }

    #[test]
    fn test_digit_led_identifier_is_error() {
        let errs = errors("123user");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("123user"));
    }

    #[test]
    fn test_strings_and_escapes() {
        let tokens = kinds(r#""a\"b\\c\n\{x\}" "" "\q""#);
        assert_eq!(
            tokens[0],
            TokenKind::Str(vec![StringPart::Literal("a\"b\\c\n{x}".to_string())])
        );
        assert_eq!(tokens[1], TokenKind::Str(vec![]));
        // Unknown escapes are kept verbatim.
        assert_eq!(tokens[2], TokenKind::Str(vec![StringPart::Literal("\\q".to_string())]));
    }

    #[test]
    fn test_interpolation_spans_point_into_source() {
        let source = r#"say "Hi {user.name}!""#;
        let tokens = lex(source).unwrap();
        let TokenKind::Str(parts) = &tokens[1].kind else {
            panic!("expected string token, got {:?}", tokens[1]);
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], StringPart::Literal("Hi ".to_string()));
        let StringPart::Interpolation { tokens: inner, span } = &parts[1] else {
            panic!("expected interpolation, got {:?}", parts[1]);
        };
        assert_eq!(&source[span.start..span.end], "user.name");
        assert_eq!(inner[0].kind, ident("user"));
        assert_eq!(&source[inner[0].span.start..inner[0].span.end], "user");
        assert_eq!(inner[0].span.column, 10);
        assert_eq!(inner.last().map(|t| &t.kind), Some(&TokenKind::Eof));
        assert_eq!(parts[2], StringPart::Literal("!".to_string()));
    }

    #[test]
    fn test_interpolation_with_nested_braces_and_strings() {
        let tokens = kinds(r#""{ {a: "x"} }""#);
        let TokenKind::Str(parts) = &tokens[0] else {
            panic!("expected string token");
        };
        let [StringPart::Interpolation { tokens: inner, .. }] = parts.as_slice() else {
            panic!("expected one interpolation, got {parts:?}");
        };
        assert!(inner[0].kind.is_punctuation(PunctuationId::LBrace));
        assert_eq!(inner[3].kind, TokenKind::Str(vec![StringPart::Literal("x".to_string())]));
    }

    #[test]
    fn test_string_errors() {
        assert!(errors(r#""{}""#)[0].message.contains("empty interpolation"));
        assert!(errors(r#""a } b""#)[0].message.contains("`}`"));
        assert!(errors("\"abc\nx").iter().any(|e| e.message.contains("unterminated string")));
        assert!(errors("\"abc").iter().any(|e| e.message.contains("unterminated string")));
    }

    fn nested_strings(levels: usize) -> String {
        format!("{}x{}", "\"{".repeat(levels), "}\"".repeat(levels))
    }

    /// Runs `f` on a thread with an 8 MiB stack, as a release binary's main thread would have.
    fn on_big_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn test_nested_interpolations_up_to_the_limit_scan() {
        let tokens = on_big_stack(|| lex(&nested_strings(MAX_INTERPOLATION_DEPTH)));
        assert!(tokens.is_ok(), "{:?}", tokens.err());
    }

    #[test]
    fn test_interpolation_nesting_past_the_limit_is_a_limit_error() {
        use crate::diagnostics::ErrorKind;

        let errs = on_big_stack(|| errors(&nested_strings(MAX_INTERPOLATION_DEPTH + 1)));
        assert_eq!(errs.len(), 1, "{errs:?}");
        assert_eq!(errs[0].kind, ErrorKind::Limit);
        assert!(errs[0].message.contains("interpolation nesting"));

        // Far past the limit the scanner still returns instead of exhausting the stack.
        let errs = on_big_stack(|| errors(&nested_strings(20_000)));
        assert!(errs.iter().all(|e| e.kind == ErrorKind::Limit), "{errs:?}");
    }

    #[test]
    fn test_unterminated_interpolation_keeps_the_line_break() {
        let source = "x = \"{a \"b\ny = 1\n";
        let (tokens, errs) = Lexer::new(source).run();
        assert!(errs[0].message.contains("unterminated string"));
        assert!(tokens.iter().any(|t| t.kind == ident("y")));
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Newline).count(), 2);
    }

    #[test]
    fn test_comments_produce_no_tokens() {
        assert_eq!(
            kinds("a # trailing\n/* block /* nested */ still */ b"),
            vec![ident("a"), TokenKind::Newline, ident("b"), TokenKind::Newline, TokenKind::Eof]
        );
        assert!(errors("/* /* */")[0].message.contains("unterminated block comment"));
    }

    #[test]
    fn test_indented_pipeline_layout() {
        assert_eq!(
            kinds("users\n  filter x\n  count\nz"),
            vec![
                ident("users"),
                TokenKind::Newline,
                TokenKind::Indent,
                ident("filter"),
                ident("x"),
                TokenKind::Newline,
                ident("count"),
                TokenKind::Newline,
                TokenKind::Dedent,
                ident("z"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_do_not_affect_layout() {
        let tokens = kinds("a\n\n   # note\n  b\n\n");
        assert_eq!(
            tokens,
            vec![
                ident("a"),
                TokenKind::Newline,
                TokenKind::Indent,
                ident("b"),
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_one_space_indent_is_error() {
        let errs = errors("users\n filter _.age > 18");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].span.line, 2);
        assert!(errs[0].message.contains("at least two spaces or one tab"));
    }

    #[test]
    fn test_tab_after_space_frame_is_error() {
        let errs = errors("users\n  filter _.age > 18\n\tmap x");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].span.line, 3);
    }

    #[test]
    fn test_mixed_prefix_is_error() {
        assert!(errors("a\n \tb")[0].message.contains("mixes tabs and spaces"));
    }

    #[test]
    fn test_partial_dedent_is_error() {
        let errs = errors("a\n    b\n  c");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("does not match"));
    }

    #[test]
    fn test_multiple_dedents() {
        let tokens = kinds("a\n  b\n    c\nd");
        let dedents = tokens.iter().filter(|t| **t == TokenKind::Dedent).count();
        let indents = tokens.iter().filter(|t| **t == TokenKind::Indent).count();
        assert_eq!((indents, dedents), (2, 2));
    }

    #[test]
    fn test_tab_indentation() {
        let tokens = kinds("a\n\tb");
        assert!(tokens.contains(&TokenKind::Indent));
    }

    #[test]
    fn test_newlines_inside_brackets() {
        let tokens = kinds("{name: \"a\"\n   age: 3\n}");
        assert_eq!(tokens.iter().filter(|t| t.is_layout()).count(), 1);
        assert_eq!(tokens[tokens.len() - 2], TokenKind::Newline);
    }

    #[test]
    fn test_unmatched_and_mismatched_brackets() {
        assert!(errors(")")[0].message.contains("unmatched closing bracket"));
        assert!(errors("}")[0].message.contains("unmatched closing bracket"));
        let errs = errors("(]");
        assert!(errs[0].message.contains("mismatched"));
        assert_eq!(errs[0].labels.len(), 1);
    }

    #[test]
    fn test_errors_are_collected() {
        let errs = errors("a ! b\n12.3.4 ~");
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn test_token_positions() {
        let tokens = lex("a\n  bb \"é\" c").unwrap();
        let c = tokens.iter().find(|t| t.kind == ident("c")).unwrap();
        assert_eq!((c.span.line, c.span.column), (2, 10));
        assert_eq!(c.span.start, 12);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \n# only a comment\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(kinds("If")[0], ident("If"));
        assert_eq!(kinds("if")[0], TokenKind::Keyword(KeywordId::If));
    }
}
