//! Number scanning for the Rill lexer
//!
//! Numbers are digits with at most one decimal point followed by digits. Every value is an `f64`.

use super::Lexer;
use super::tokens::TokenKind;

impl<'a> Lexer<'a> {
    /// Scan a number whose first digit at `start` has been consumed.
    pub(super) fn scan_number(&mut self, start: usize) {
        self.skip_digits();

        // Decimal part; `3.x` stays a number followed by `.`.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.skip_digits();

            if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
                    self.advance();
                }
                let text = &self.source[start..self.current_pos];
                let message = format!("invalid number literal `{text}`: more than one decimal point");
                self.error(message, start);
                return;
            }
        }

        if self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                self.advance();
            }
            if matches!(self.peek(), Some('?' | '!')) {
                self.advance();
            }
            let text = &self.source[start..self.current_pos];
            let message = format!("invalid number literal `{text}`: identifiers cannot start with a digit");
            self.error(message, start);
            return;
        }

        let text = &self.source[start..self.current_pos];
        match text.parse::<f64>() {
            Ok(value) => self.add_token(TokenKind::Number(value), start),
            Err(_) => {
                let message = format!("invalid number literal `{text}`");
                self.error(message, start);
            }
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}
