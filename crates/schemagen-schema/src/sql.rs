//! Table metadata from SQL DDL scripts.
//!
//! [`parse_ddl`] reads `CREATE TABLE` statements and reports each table's
//! columns with their declared SQL type. Constraints, defaults and type
//! arguments are read past but not kept. Every other statement (inserts,
//! indexes, views, ...) is skipped. Dialect quirks of MySQL, PostgreSQL and
//! SQLite that commonly show up in schema dumps are tolerated: quoted
//! identifiers, `IF NOT EXISTS`, schema-qualified names, trailing table
//! options and multi-word types like `DOUBLE PRECISION`, which keep their
//! leading word.

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Dialect, Token, TokenKind, tokenize};

/// A table and its columns in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Leading type keyword as written, e.g. `VARCHAR` or `double`. Empty
    /// when the column declares no type.
    pub sql_type: String,
}

/// Leading keywords of table-level constraints.
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY", "FOREIGN", "CONSTRAINT", "CHECK", "EXCLUDE", "UNIQUE", "KEY", "INDEX", "FULLTEXT",
    "SPATIAL",
];

/// Keywords that may directly follow a column name when no type is declared.
const COLUMN_CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY", "NOT", "NULL", "DEFAULT", "UNIQUE", "REFERENCES", "CHECK", "CONSTRAINT",
    "COLLATE", "GENERATED",
];

/// Parse every `CREATE TABLE` statement in `source`.
pub fn parse_ddl(source: &str) -> ParseResult<Vec<Table>> {
    let tokens = tokenize(source, Dialect::Sql)?;
    DdlParser { tokens, pos: 0 }.script()
}

struct DdlParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl DdlParser {
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_keyword_ci(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_symbol(&mut self, c: char) -> bool {
        if self.peek().is_symbol(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        token.error(format!("expected {expected}, found {}", token.describe()))
    }

    /// A bare or quoted identifier.
    fn name(&mut self) -> Option<String> {
        let name = match &self.peek().kind {
            TokenKind::Ident(s) | TokenKind::QuotedIdent(s) => s.clone(),
            _ => return None,
        };
        self.pos += 1;
        Some(name)
    }

    /// `schema.table` keeps only the last segment.
    fn qualified_name(&mut self) -> ParseResult<String> {
        let mut name = self.name().ok_or_else(|| self.unexpected("table name"))?;
        while self.eat_symbol('.') {
            name = self.name().ok_or_else(|| self.unexpected("identifier"))?;
        }
        Ok(name)
    }

    fn script(mut self) -> ParseResult<Vec<Table>> {
        let mut tables = Vec::new();
        loop {
            if self.peek().is_eof() {
                return Ok(tables);
            }
            if self.eat_symbol(';') {
                continue;
            }
            if self.at_create_table() {
                if let Some(table) = self.create_table()? {
                    tables.push(table);
                }
            } else {
                self.skip_statement()?;
            }
        }
    }

    /// `CREATE [OR REPLACE] [GLOBAL|LOCAL] [TEMP|TEMPORARY|UNLOGGED] TABLE`
    fn at_create_table(&self) -> bool {
        if !self.peek().is_keyword_ci("CREATE") {
            return false;
        }
        let mut offset = 1;
        loop {
            let token = self.peek_at(offset);
            if token.is_keyword_ci("TABLE") {
                return true;
            }
            let is_modifier = ["OR", "REPLACE", "GLOBAL", "LOCAL", "TEMP", "TEMPORARY", "UNLOGGED"]
                .iter()
                .any(|m| token.is_keyword_ci(m));
            if !is_modifier {
                return false;
            }
            offset += 1;
        }
    }

    fn create_table(&mut self) -> ParseResult<Option<Table>> {
        while !self.eat_keyword("TABLE") {
            self.advance();
        }
        if self.peek().is_keyword_ci("IF") {
            self.pos += 1;
            self.eat_keyword("NOT");
            if !self.eat_keyword("EXISTS") {
                return Err(self.unexpected("\"EXISTS\""));
            }
        }
        let name = self.qualified_name()?;

        // CREATE TABLE x AS SELECT ... / CREATE TABLE x LIKE y
        if !self.eat_symbol('(') {
            self.skip_statement()?;
            return Ok(None);
        }

        let mut columns: Vec<Column> = Vec::new();
        loop {
            if self.eat_symbol(')') {
                break;
            }
            if self.eat_symbol(',') {
                continue;
            }
            if self.peek().is_eof() {
                return Err(self.unexpected("\")\""));
            }
            if self.at_table_constraint() {
                self.skip_definition()?;
            } else {
                columns.push(self.column()?);
            }
        }
        self.skip_statement()?;

        Ok(Some(Table { name, columns }))
    }

    /// Distinguishes `KEY idx (a)` from a column that happens to be named `key`.
    fn at_table_constraint(&self) -> bool {
        let token = self.peek();
        if !CONSTRAINT_KEYWORDS.iter().any(|k| token.is_keyword_ci(k)) {
            return false;
        }
        if ["PRIMARY", "FOREIGN", "CONSTRAINT", "CHECK", "EXCLUDE"]
            .iter()
            .any(|k| token.is_keyword_ci(k))
        {
            return true;
        }
        let next = self.peek_at(1);
        if next.is_symbol('(') || next.is_keyword_ci("KEY") || next.is_keyword_ci("INDEX") {
            return true;
        }
        // `UNIQUE idx_name (col)` vs. `key VARCHAR(10)`
        let after = self.peek_at(2);
        let next_is_type = next.ident().is_some_and(is_type_keyword);
        after.is_symbol('(') && !next_is_type
    }

    fn column(&mut self) -> ParseResult<Column> {
        let name = self.name().ok_or_else(|| self.unexpected("column name"))?;

        // SQLite allows columns without a declared type
        let sql_type = self
            .peek()
            .ident()
            .filter(|w| !COLUMN_CONSTRAINT_KEYWORDS.iter().any(|k| w.eq_ignore_ascii_case(k)))
            .map(str::to_string)
            .unwrap_or_default();

        self.skip_definition()?;
        Ok(Column { name, sql_type })
    }

    /// Consume the rest of a column or constraint, up to the next top-level
    /// `,` or the closing `)` of the table.
    fn skip_definition(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Eof => return Err(token.error("unbalanced parentheses in table")),
                TokenKind::Symbol(',') | TokenKind::Symbol(')') if depth == 0 => return Ok(()),
                TokenKind::Symbol('(') => depth += 1,
                TokenKind::Symbol(')') => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Consume through the next top-level `;` (or end of input).
    fn skip_statement(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::Eof => {
                    return if depth == 0 {
                        Ok(())
                    } else {
                        Err(token.error("unbalanced parentheses"))
                    };
                }
                TokenKind::Symbol(';') if depth == 0 => return Ok(()),
                TokenKind::Symbol('(') => depth += 1,
                TokenKind::Symbol(')') => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| token.error("unbalanced parentheses"))?;
                }
                _ => {}
            }
        }
    }
}

fn is_type_keyword(word: &str) -> bool {
    const TYPES: &[&str] = &[
        "BIT", "TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INTEGER", "BIGINT", "SERIAL",
        "BIGSERIAL", "CHAR", "VARCHAR", "TEXT", "TINYTEXT", "MEDIUMTEXT", "LONGTEXT", "DATE",
        "DATETIME", "TIME", "TIMESTAMP", "DECIMAL", "NUMERIC", "REAL", "FLOAT", "DOUBLE", "BLOB",
        "TINYBLOB", "MEDIUMBLOB", "LONGBLOB", "BYTEA", "JSON", "BOOL", "BOOLEAN", "UUID",
        "BINARY", "VARBINARY", "ENUM", "INT2", "INT4", "INT8", "SMALLSERIAL", "SERIAL8",
        "FLOAT4", "FLOAT8", "JSONB",
    ];
    TYPES.iter().any(|t| word.eq_ignore_ascii_case(t))
}
