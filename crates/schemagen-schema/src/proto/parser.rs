//! Recursive-descent parser for `.proto` sources.

use super::{
    Enum, EnumValue, Extend, Group, Import, Label, Literal, LiteralMap, MapField, Message,
    MessageElement, NormalField, Oneof, ProtoFile, ProtoOption, Rpc, Service,
};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Dialect, Token, TokenKind, tokenize};

/// Parse a `.proto` source into its declaration tree.
pub fn parse_proto(source: &str) -> ParseResult<ProtoFile> {
    let tokens = tokenize(source, Dialect::Proto)?;
    Parser { tokens, pos: 0 }.file()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_next(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + 1).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn eat_symbol(&mut self, c: char) -> bool {
        if self.peek().is_symbol(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_keyword(keyword) {
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

    fn expect_symbol(&mut self, c: char) -> ParseResult<()> {
        if self.eat_symbol(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("\"{c}\"")))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("\"{keyword}\"")))
        }
    }

    fn ident(&mut self) -> ParseResult<String> {
        match self.peek().ident() {
            Some(name) => {
                let name = name.to_string();
                self.pos += 1;
                Ok(name)
            }
            None => Err(self.unexpected("identifier")),
        }
    }

    /// `foo.bar.Baz`, optionally with a leading dot.
    fn full_ident(&mut self) -> ParseResult<String> {
        let mut name = String::new();
        if self.eat_symbol('.') {
            name.push('.');
        }
        name.push_str(&self.ident()?);
        while self.peek().is_symbol('.') {
            self.pos += 1;
            name.push('.');
            name.push_str(&self.ident()?);
        }
        Ok(name)
    }

    fn string(&mut self) -> ParseResult<String> {
        let mut out = match &self.peek().kind {
            TokenKind::Str(s) => s.clone(),
            _ => return Err(self.unexpected("string literal")),
        };
        self.pos += 1;
        // Adjacent literals concatenate: "a" "b" == "ab"
        while let TokenKind::Str(s) = &self.peek().kind {
            out.push_str(s);
            self.pos += 1;
        }
        Ok(out)
    }

    fn number(&mut self) -> ParseResult<String> {
        let sign = if self.eat_symbol('-') { "-" } else { "" };
        match &self.peek().kind {
            TokenKind::Number(n) => {
                let n = format!("{sign}{n}");
                self.pos += 1;
                Ok(n)
            }
            _ => Err(self.unexpected("number")),
        }
    }

    fn file(mut self) -> ParseResult<ProtoFile> {
        let mut file = ProtoFile::default();

        loop {
            let token = self.peek().clone();
            if token.is_eof() {
                return Ok(file);
            }
            if self.eat_symbol(';') {
                continue;
            }
            match token.ident() {
                Some("syntax") | Some("edition") => {
                    self.pos += 1;
                    self.expect_symbol('=')?;
                    file.syntax = Some(self.string()?);
                    self.expect_symbol(';')?;
                }
                Some("package") => {
                    self.pos += 1;
                    file.package = Some(self.full_ident()?);
                    self.expect_symbol(';')?;
                }
                Some("import") => {
                    self.pos += 1;
                    let kind = match self.peek().ident() {
                        Some(k @ ("public" | "weak")) => {
                            let k = k.to_string();
                            self.pos += 1;
                            Some(k)
                        }
                        _ => None,
                    };
                    let path = self.string()?;
                    self.expect_symbol(';')?;
                    file.imports.push(Import { path, kind });
                }
                Some("option") => file.options.push(self.option_statement()?),
                Some("message") => file.messages.push(self.message()?),
                Some("enum") => file.enums.push(self.enumeration()?),
                Some("service") => file.services.push(self.service()?),
                Some("extend") => file.extends.push(self.extend()?),
                _ => return Err(self.unexpected("top-level declaration")),
            }
        }
    }

    /// `option <name> = <constant>;`
    fn option_statement(&mut self) -> ParseResult<ProtoOption> {
        self.expect_keyword("option")?;
        let option = self.option_assignment()?;
        self.expect_symbol(';')?;
        Ok(option)
    }

    fn option_assignment(&mut self) -> ParseResult<ProtoOption> {
        let name = self.option_name()?;
        self.expect_symbol('=')?;
        let constant = self.constant()?;
        Ok(ProtoOption { name, constant })
    }

    /// `deprecated`, `(google.api.http)`, `(my.ext).field`
    fn option_name(&mut self) -> ParseResult<String> {
        let mut name = if self.eat_symbol('(') {
            let inner = self.full_ident()?;
            self.expect_symbol(')')?;
            format!("({inner})")
        } else {
            self.ident()?
        };
        while self.eat_symbol('.') {
            name.push('.');
            if self.eat_symbol('(') {
                let inner = self.full_ident()?;
                self.expect_symbol(')')?;
                name.push_str(&format!("({inner})"));
            } else {
                name.push_str(&self.ident()?);
            }
        }
        Ok(name)
    }

    /// `[deprecated = true, (validate.rules).string.min_len = 1]`
    fn field_options(&mut self) -> ParseResult<Vec<ProtoOption>> {
        let mut options = Vec::new();
        if !self.eat_symbol('[') {
            return Ok(options);
        }
        loop {
            options.push(self.option_assignment()?);
            if self.eat_symbol(']') {
                return Ok(options);
            }
            self.expect_symbol(',')?;
        }
    }

    fn constant(&mut self) -> ParseResult<Literal> {
        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Symbol('{') => {
                self.pos += 1;
                self.aggregate('}')
            }
            TokenKind::Symbol('<') => {
                self.pos += 1;
                self.aggregate('>')
            }
            TokenKind::Symbol('[') => {
                self.pos += 1;
                self.list()
            }
            TokenKind::Str(_) => Ok(Literal::string(self.string()?)),
            TokenKind::Symbol(sign @ ('-' | '+')) => {
                let sign = *sign;
                self.pos += 1;
                let next = self.advance();
                match next.kind {
                    TokenKind::Number(n) | TokenKind::Ident(n) => {
                        let prefix = if sign == '-' { "-" } else { "" };
                        Ok(Literal::scalar(format!("{prefix}{n}")))
                    }
                    _ => Err(next.error(format!(
                        "expected number after \"{sign}\", found {}",
                        next.describe()
                    ))),
                }
            }
            TokenKind::Number(n) => {
                let n = n.clone();
                self.pos += 1;
                Ok(Literal::scalar(n))
            }
            TokenKind::Ident(_) => Ok(Literal::scalar(self.full_ident()?)),
            _ => Err(self.unexpected("constant")),
        }
    }

    /// Text-format message body: `key: value key2 { ... }`
    fn aggregate(&mut self, close: char) -> ParseResult<Literal> {
        let mut map = LiteralMap::new();
        loop {
            if self.eat_symbol(close) {
                return Ok(Literal {
                    map,
                    ..Literal::default()
                });
            }
            let key = if self.eat_symbol('[') {
                let inner = self.full_ident()?;
                self.expect_symbol(']')?;
                format!("[{inner}]")
            } else {
                self.ident()?
            };
            let has_colon = self.eat_symbol(':');
            let next = self.peek();
            if !has_colon && !next.is_symbol('{') && !next.is_symbol('<') {
                return Err(self.unexpected("\":\""));
            }
            let value = self.constant()?;
            map.insert(key, value);
            if !self.eat_symbol(',') {
                self.eat_symbol(';');
            }
        }
    }

    fn list(&mut self) -> ParseResult<Literal> {
        let mut array = Vec::new();
        if !self.eat_symbol(']') {
            loop {
                array.push(self.constant()?);
                if self.eat_symbol(']') {
                    break;
                }
                self.expect_symbol(',')?;
            }
        }
        Ok(Literal {
            array,
            ..Literal::default()
        })
    }

    fn message(&mut self) -> ParseResult<Message> {
        self.expect_keyword("message")?;
        let name = self.ident()?;
        self.expect_symbol('{')?;
        let elements = self.message_body()?;
        Ok(Message { name, elements })
    }

    /// Elements up to and including the closing brace.
    fn message_body(&mut self) -> ParseResult<Vec<MessageElement>> {
        let mut elements = Vec::new();
        loop {
            if self.eat_symbol('}') {
                return Ok(elements);
            }
            if self.eat_symbol(';') {
                continue;
            }
            if self.peek().is_eof() {
                return Err(self.unexpected("\"}\""));
            }

            let is_map = self.peek().is_keyword("map") && self.peek_next().is_symbol('<');
            let element = match self.peek().ident() {
                Some("message") => MessageElement::Message(self.message()?),
                Some("enum") => MessageElement::Enum(self.enumeration()?),
                Some("extend") => MessageElement::Extend(self.extend()?),
                Some("option") => MessageElement::Option(self.option_statement()?),
                Some("oneof") => MessageElement::Oneof(self.oneof()?),
                Some("reserved") => MessageElement::Reserved(self.ranges("reserved")?),
                Some("extensions") => MessageElement::Extensions(self.ranges("extensions")?),
                _ if is_map => MessageElement::Map(self.map_field()?),
                _ => self.labelled_field()?,
            };
            elements.push(element);
        }
    }

    fn label(&mut self) -> Option<Label> {
        let label = match self.peek().ident() {
            Some("optional") => Label::Optional,
            Some("required") => Label::Required,
            Some("repeated") => Label::Repeated,
            _ => return None,
        };
        self.pos += 1;
        Some(label)
    }

    /// A field or group, with an optional cardinality label.
    fn labelled_field(&mut self) -> ParseResult<MessageElement> {
        let label = self.label();
        if self.peek().is_keyword("group") && self.peek_next().ident().is_some() {
            self.pos += 1;
            let name = self.ident()?;
            self.expect_symbol('=')?;
            let number = self.number()?;
            self.field_options()?;
            self.expect_symbol('{')?;
            let elements = self.message_body()?;
            return Ok(MessageElement::Group(Group {
                name,
                number,
                label,
                elements,
            }));
        }
        Ok(MessageElement::Field(self.field(label)?))
    }

    fn field(&mut self, label: Option<Label>) -> ParseResult<NormalField> {
        let ty = self.full_ident()?;
        let name = self.ident()?;
        self.expect_symbol('=')?;
        let number = self.number()?;
        let options = self.field_options()?;
        self.expect_symbol(';')?;
        Ok(NormalField {
            name,
            ty,
            number,
            label,
            options,
        })
    }

    fn map_field(&mut self) -> ParseResult<MapField> {
        self.expect_keyword("map")?;
        self.expect_symbol('<')?;
        let key_type = self.full_ident()?;
        self.expect_symbol(',')?;
        let value_type = self.full_ident()?;
        self.expect_symbol('>')?;
        let name = self.ident()?;
        self.expect_symbol('=')?;
        let number = self.number()?;
        let options = self.field_options()?;
        self.expect_symbol(';')?;
        Ok(MapField {
            name,
            key_type,
            value_type,
            number,
            options,
        })
    }

    fn oneof(&mut self) -> ParseResult<Oneof> {
        self.expect_keyword("oneof")?;
        let name = self.ident()?;
        self.expect_symbol('{')?;
        let mut fields = Vec::new();
        let mut options = Vec::new();
        loop {
            if self.eat_symbol('}') {
                return Ok(Oneof {
                    name,
                    fields,
                    options,
                });
            }
            if self.eat_symbol(';') {
                continue;
            }
            if self.peek().is_keyword("option") {
                options.push(self.option_statement()?);
            } else if self.peek().is_eof() {
                return Err(self.unexpected("\"}\""));
            } else {
                fields.push(self.field(None)?);
            }
        }
    }

    /// `reserved 2, 15, 9 to 11, "foo";` as comma-separated entries.
    fn ranges(&mut self, keyword: &str) -> ParseResult<Vec<String>> {
        self.expect_keyword(keyword)?;
        let mut entries = Vec::new();
        let mut current: Vec<String> = Vec::new();
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::Symbol(';') => break,
                TokenKind::Symbol(',') => entries.push(current.split_off(0).join(" ")),
                TokenKind::Symbol('[') => {
                    // extension range options
                    self.pos -= 1;
                    self.field_options()?;
                }
                TokenKind::Symbol('-') => current.push("-".to_string()),
                TokenKind::Number(s) | TokenKind::Ident(s) => match current.last_mut() {
                    Some(last) if *last == "-" => last.push_str(&s),
                    _ => current.push(s),
                },
                TokenKind::Str(s) => current.push(s),
                TokenKind::Eof => return Err(token.error("expected \";\", found end of input")),
                _ => return Err(token.error(format!("unexpected {}", token.describe()))),
            }
        }
        if !current.is_empty() {
            entries.push(current.join(" "));
        }
        Ok(entries)
    }

    fn enumeration(&mut self) -> ParseResult<Enum> {
        self.expect_keyword("enum")?;
        let name = self.ident()?;
        self.expect_symbol('{')?;
        let mut values = Vec::new();
        let mut options = Vec::new();
        loop {
            if self.eat_symbol('}') {
                return Ok(Enum {
                    name,
                    values,
                    options,
                });
            }
            if self.eat_symbol(';') {
                continue;
            }
            match self.peek().ident() {
                Some("option") => options.push(self.option_statement()?),
                Some("reserved") => {
                    self.ranges("reserved")?;
                }
                Some(_) => {
                    let value_name = self.ident()?;
                    self.expect_symbol('=')?;
                    let number = self.number()?;
                    let value_options = self.field_options()?;
                    self.expect_symbol(';')?;
                    values.push(EnumValue {
                        name: value_name,
                        number,
                        options: value_options,
                    });
                }
                None => return Err(self.unexpected("enum value")),
            }
        }
    }

    fn extend(&mut self) -> ParseResult<Extend> {
        self.expect_keyword("extend")?;
        let target = self.full_ident()?;
        self.expect_symbol('{')?;
        let mut fields = Vec::new();
        for element in self.message_body()? {
            if let MessageElement::Field(field) = element {
                fields.push(field);
            }
        }
        Ok(Extend { target, fields })
    }

    fn service(&mut self) -> ParseResult<Service> {
        self.expect_keyword("service")?;
        let name = self.ident()?;
        self.expect_symbol('{')?;
        let mut rpcs = Vec::new();
        let mut options = Vec::new();
        loop {
            if self.eat_symbol('}') {
                return Ok(Service {
                    name,
                    rpcs,
                    options,
                });
            }
            if self.eat_symbol(';') {
                continue;
            }
            match self.peek().ident() {
                Some("option") => options.push(self.option_statement()?),
                Some("rpc") => rpcs.push(self.rpc()?),
                _ => return Err(self.unexpected("\"rpc\" or \"option\"")),
            }
        }
    }

    /// `(stream Type)` as used for rpc request/response types.
    fn rpc_type(&mut self) -> ParseResult<(String, bool)> {
        self.expect_symbol('(')?;
        let streams = self.peek().is_keyword("stream") && !self.peek_next().is_symbol(')');
        if streams {
            self.pos += 1;
        }
        let ty = self.full_ident()?;
        self.expect_symbol(')')?;
        Ok((ty, streams))
    }

    fn rpc(&mut self) -> ParseResult<Rpc> {
        self.expect_keyword("rpc")?;
        let name = self.ident()?;
        let (request_type, streams_request) = self.rpc_type()?;
        self.expect_keyword("returns")?;
        let (returns_type, streams_returns) = self.rpc_type()?;

        let mut options = Vec::new();
        if self.eat_symbol('{') {
            loop {
                if self.eat_symbol('}') {
                    break;
                }
                if self.eat_symbol(';') {
                    continue;
                }
                if self.peek().is_keyword("option") {
                    options.push(self.option_statement()?);
                } else {
                    return Err(self.unexpected("\"option\" or \"}\""));
                }
            }
            self.eat_symbol(';');
        } else {
            self.expect_symbol(';')?;
        }

        Ok(Rpc {
            name,
            request_type,
            streams_request,
            returns_type,
            streams_returns,
            options,
        })
    }
}

#[cfg(test)]
#[path = "parser/parser_tests.rs"]
mod parser_tests;
