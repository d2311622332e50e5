//! Single-pass formula tokenizer.
//!
//! The scanner walks the formula once with one character of pushback and
//! yields numbers, cell references, the four arithmetic operators, and the
//! `@` function escape. Whitespace is consumed internally and never returned.

use crate::error::{FormulaError, Result};

/// Payload-free tag of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    CellReference,
    Add,
    Subtract,
    Multiply,
    Divide,
    FunctionEscape,
    Whitespace,
    End,
}

/// A scanned token, borrowing its text payloads from the formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    Number(f64),
    CellReference(&'a str),
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Everything after `@`, verbatim.
    FunctionEscape(&'a str),
    Whitespace,
    End,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::CellReference(_) => TokenKind::CellReference,
            Token::Add => TokenKind::Add,
            Token::Subtract => TokenKind::Subtract,
            Token::Multiply => TokenKind::Multiply,
            Token::Divide => TokenKind::Divide,
            Token::FunctionEscape(_) => TokenKind::FunctionEscape,
            Token::Whitespace => TokenKind::Whitespace,
            Token::End => TokenKind::End,
        }
    }
}

/// Payload of the current token, if it has one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Stateful scanner over one formula. Build a fresh one per formula.
pub struct Tokenizer<'a> {
    buffer: &'a str,
    pos: usize,
    start: usize,
    token: Token<'a>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(formula: &'a str) -> Self {
        Tokenizer {
            buffer: formula,
            pos: 0,
            start: 0,
            token: Token::End,
            finished: false,
        }
    }

    fn read(&mut self) -> Option<char> {
        let c = self.buffer[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unread(&mut self, c: char) {
        self.pos -= c.len_utf8();
    }

    /// Consume characters while `accept` holds, pushing back the first rejected one.
    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        while let Some(c) = self.read() {
            if !accept(c) {
                self.unread(c);
                break;
            }
        }
        let buffer = self.buffer;
        &buffer[self.start..self.pos]
    }

    fn read_number(&mut self) -> Result<Token<'a>> {
        let text = self.read_while(|c| c.is_ascii_digit() || c == '.');
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| FormulaError::MalformedToken {
                found: text.to_string(),
                offset: self.start,
            })
    }

    fn read_cell_reference(&mut self) -> Token<'a> {
        Token::CellReference(self.read_while(char::is_alphanumeric))
    }

    fn read_function(&mut self) -> Token<'a> {
        let buffer = self.buffer;
        let source = &buffer[self.pos..];
        self.pos = self.buffer.len();
        self.finished = true;
        Token::FunctionEscape(source)
    }

    /// Advance to the next token.
    ///
    /// Returns `Ok(false)` once nothing further can follow: at end of input,
    /// and immediately after a function escape (which swallows the rest of
    /// the formula). The consumed token is available from
    /// [`current_token`](Self::current_token) either way.
    pub fn read_next_token(&mut self) -> Result<bool> {
        if self.finished {
            self.token = Token::End;
            return Ok(false);
        }

        loop {
            self.start = self.pos;
            let Some(c) = self.read() else {
                self.token = Token::End;
                self.finished = true;
                return Ok(false);
            };

            self.token = match c {
                ' ' | '\t' => Token::Whitespace,
                '0'..='9' => self.read_number()?,
                '+' => Token::Add,
                '-' => Token::Subtract,
                '*' => Token::Multiply,
                '/' => Token::Divide,
                '@' => {
                    self.token = self.read_function();
                    return Ok(false);
                }
                c if c.is_alphabetic() => self.read_cell_reference(),
                other => {
                    return Err(FormulaError::MalformedToken {
                        found: other.to_string(),
                        offset: self.start,
                    });
                }
            };

            if self.token != Token::Whitespace {
                return Ok(true);
            }
        }
    }

    pub fn current_token(&self) -> Token<'a> {
        self.token
    }

    pub fn current_value(&self) -> Option<TokenValue<'a>> {
        match self.token {
            Token::Number(n) => Some(TokenValue::Number(n)),
            Token::CellReference(text) | Token::FunctionEscape(text) => Some(TokenValue::Text(text)),
            _ => None,
        }
    }

    /// Byte offset where the current token starts.
    pub fn offset(&self) -> usize {
        self.start
    }
}
