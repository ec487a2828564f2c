//! Tokenizer shared by the proto and SQL readers.
//!
//! The two dialects differ only in comment syntax and in what a quote
//! character means:
//!
//! | Dialect | Comments | `"..."` | `'...'` | `` `...` `` |
//! |---------|----------|---------|---------|-------------|
//! | [`Dialect::Proto`] | `//`, `/* */` | string | string | error |
//! | [`Dialect::Sql`] | `--`, `#`, `/* */` | identifier | string | identifier |

use crate::error::{ParseError, ParseResult};

/// Source language being tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Proto,
    Sql,
}

/// Token payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Bare identifier or keyword.
    Ident(String),
    /// Numeric literal, verbatim.
    Number(String),
    /// String literal with quotes removed and escapes decoded.
    Str(String),
    /// Quoted identifier (SQL only), quotes removed.
    QuotedIdent(String),
    /// Any single punctuation character.
    Symbol(char),
    /// End of input.
    Eof,
}

/// A token with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// The identifier text, if this is a bare identifier.
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the given bare keyword (case-sensitive).
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.ident() == Some(keyword)
    }

    /// Whether this is the given bare keyword, ignoring ASCII case.
    pub fn is_keyword_ci(&self, keyword: &str) -> bool {
        self.ident()
            .is_some_and(|s| s.eq_ignore_ascii_case(keyword))
    }

    pub fn is_symbol(&self, c: char) -> bool {
        self.kind == TokenKind::Symbol(c)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Short human-readable description for error messages.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Ident(s) | TokenKind::Number(s) => format!("\"{s}\""),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::QuotedIdent(s) => format!("identifier \"{s}\""),
            TokenKind::Symbol(c) => format!("\"{c}\""),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    /// Build an error located at this token.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, self.column, message)
    }
}

/// Split `source` into tokens, always ending with a [`TokenKind::Eof`] token.
pub fn tokenize(source: &str, dialect: Dialect) -> ParseResult<Vec<Token>> {
    Lexer::new(source, dialect).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    dialect: Dialect,
}

impl Lexer {
    fn new(source: &str, dialect: Dialect) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            dialect,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn run(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;
            let (line, column) = (self.line, self.column);
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    column,
                });
                return Ok(tokens);
            };

            let kind = if c.is_ascii_alphabetic() || c == '_' {
                TokenKind::Ident(self.take_while(|c| c.is_ascii_alphanumeric() || c == '_'))
            } else if c.is_ascii_digit() {
                TokenKind::Number(self.number())
            } else if c == '\'' || (c == '"' && self.dialect == Dialect::Proto) {
                TokenKind::Str(self.string(c, line, column)?)
            } else if (c == '"' || c == '`') && self.dialect == Dialect::Sql {
                TokenKind::QuotedIdent(self.quoted_ident(c, line, column)?)
            } else if c.is_ascii_punctuation() {
                self.bump();
                TokenKind::Symbol(c)
            } else {
                return Err(ParseError::new(
                    line,
                    column,
                    format!("unexpected character '{c}'"),
                ));
            };

            tokens.push(Token { kind, line, column });
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn number(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                out.push(c);
                self.bump();
                // Signed exponent: 1e-5, 2.5E+3
                let is_hex = out.starts_with("0x") || out.starts_with("0X");
                if (c == 'e' || c == 'E')
                    && !is_hex
                    && matches!(self.peek(), Some('+') | Some('-'))
                    && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())
                {
                    if let Some(sign) = self.bump() {
                        out.push(sign);
                    }
                }
            } else {
                break;
            }
        }
        out
    }

    fn string(&mut self, quote: char, line: usize, column: usize) -> ParseResult<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(ParseError::new(line, column, "unterminated string literal"));
                }
                Some(c) if c == quote => {
                    // SQL escapes a quote by doubling it
                    if self.dialect == Dialect::Sql && self.peek() == Some(quote) {
                        self.bump();
                        out.push(quote);
                        continue;
                    }
                    return Ok(out);
                }
                Some('\\') if self.dialect == Dialect::Proto => {
                    let escaped = self
                        .bump()
                        .ok_or_else(|| ParseError::new(line, column, "unterminated escape"))?;
                    out.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        other => other,
                    });
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn quoted_ident(&mut self, quote: char, line: usize, column: usize) -> ParseResult<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(ParseError::new(line, column, "unterminated quoted identifier"));
                }
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) if self.dialect == Dialect::Proto => self.skip_line(),
                (Some('-'), Some('-')) if self.dialect == Dialect::Sql => self.skip_line(),
                (Some('#'), _) if self.dialect == Dialect::Sql => self.skip_line(),
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => {
                                return Err(ParseError::new(
                                    line,
                                    column,
                                    "unterminated block comment",
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }
}
