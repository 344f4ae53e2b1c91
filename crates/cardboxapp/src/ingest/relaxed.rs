//! Parser for relaxed object notation, the kind AI chat tools and hand-written
//! snippets produce:
//!
//! ```text
//! {
//!   title: 'Pancakes',          // bare keys, single quotes
//!   servings: "4",
//!   pageNumber: +12,
//!   ingredients: [`3 eggs`, "5dl milk",],   /* trailing commas */
//! }
//! ```
//!
//! Input is split into tokens and parsed by recursive descent straight into a
//! `serde_json::Value`. Nothing is ever evaluated. Values that JSON cannot hold
//! (`NaN`, `Infinity`, template interpolation) are rejected; `undefined` reads as
//! `null`. One pair of wrapping parentheses and trailing semicolons are allowed.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct RelaxedError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pos {
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Semicolon,
    Str(String),
    Num(Number),
    Ident(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Str(_) => "string".to_string(),
            Token::Num(n) => format!("number {}", n),
            Token::Ident(name) => format!("'{}'", name),
        }
    }
}

fn error_at(pos: Pos, message: impl Into<String>) -> RelaxedError {
    RelaxedError {
        message: message.into(),
        line: pos.line,
        column: pos.column,
    }
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    pos: Pos,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            pos: Pos { line: 1, column: 1 },
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Returns the tokens and the position just past the input.
    fn tokenize(mut self) -> Result<(Vec<(Token, Pos)>, Pos), RelaxedError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok((tokens, self.pos))
    }

    fn next_token(&mut self) -> Result<Option<(Token, Pos)>, RelaxedError> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let token = match c {
            '{' | '}' | '[' | ']' | '(' | ')' | ':' | ',' | ';' => {
                self.bump();
                match c {
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ':' => Token::Colon,
                    ',' => Token::Comma,
                    _ => Token::Semicolon,
                }
            }
            '"' | '\'' | '`' | '\u{201c}' | '\u{2018}' => Token::Str(self.string(c)?),
            '0'..='9' | '.' | '+' | '-' => Token::Num(self.number()?),
            c if c.is_alphabetic() || c == '_' || c == '$' => Token::Ident(self.identifier()),
            other => {
                return Err(error_at(
                    start,
                    format!("Unexpected character '{}'", other),
                ))
            }
        };
        Ok(Some((token, start)))
    }

    fn skip_trivia(&mut self) -> Result<(), RelaxedError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let start = self.pos;
                    self.bump();
                    match self.peek() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            self.bump();
                            let mut closed = false;
                            while let Some(c) = self.bump() {
                                if c == '*' && self.peek() == Some('/') {
                                    self.bump();
                                    closed = true;
                                    break;
                                }
                            }
                            if !closed {
                                return Err(error_at(start, "Unterminated comment"));
                            }
                        }
                        _ => return Err(error_at(start, "Unexpected character '/'")),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn string(&mut self, open: char) -> Result<String, RelaxedError> {
        let start = self.pos;
        self.bump();
        // curly quotes pasted from chat tools close with their mirror image
        let quote = match open {
            '\u{201c}' => '\u{201d}',
            '\u{2018}' => '\u{2019}',
            other => other,
        };
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(error_at(start, "Unterminated string"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\n' if quote != '`' => return Err(error_at(start, "Unterminated string")),
                '$' if quote == '`' && self.peek() == Some('{') => {
                    return Err(error_at(
                        start,
                        "Template interpolation is not supported",
                    ))
                }
                '\\' => {
                    if let Some(escaped) = self.escape(start)? {
                        out.push(escaped);
                    }
                }
                c => out.push(c),
            }
        }
    }

    /// Returns `None` for a line continuation.
    fn escape(&mut self, start: Pos) -> Result<Option<char>, RelaxedError> {
        let Some(c) = self.bump() else {
            return Err(error_at(start, "Unterminated string"));
        };
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            '\n' => return Ok(None),
            'x' => self.hex_escape(2, start)?,
            'u' if self.peek() == Some('{') => {
                self.bump();
                let mut digits = String::new();
                while let Some(d) = self.bump() {
                    if d == '}' {
                        break;
                    }
                    digits.push(d);
                }
                decode_code_point(&digits, start)?
            }
            'u' => self.unicode_escape(start)?,
            other => other,
        };
        Ok(Some(decoded))
    }

    fn hex_escape(&mut self, len: usize, start: Pos) -> Result<char, RelaxedError> {
        let mut digits = String::with_capacity(len);
        for _ in 0..len {
            match self.bump() {
                Some(d) => digits.push(d),
                None => return Err(error_at(start, "Unterminated string")),
            }
        }
        decode_code_point(&digits, start)
    }

    fn unicode_escape(&mut self, start: Pos) -> Result<char, RelaxedError> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            match self.bump() {
                Some(d) => digits.push(d),
                None => return Err(error_at(start, "Unterminated string")),
            }
        }
        let unit = u32::from_str_radix(&digits, 16)
            .map_err(|_| error_at(start, format!("Invalid escape \\u{}", digits)))?;

        // Surrogate pairs arrive as two consecutive \u escapes.
        if (0xD800..0xDC00).contains(&unit) {
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return Err(error_at(start, "Unpaired surrogate in string"));
            }
            let mut low = String::with_capacity(4);
            for _ in 0..4 {
                match self.bump() {
                    Some(d) => low.push(d),
                    None => return Err(error_at(start, "Unterminated string")),
                }
            }
            let low = u32::from_str_radix(&low, 16)
                .map_err(|_| error_at(start, "Unpaired surrogate in string"))?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(error_at(start, "Unpaired surrogate in string"));
            }
            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| error_at(start, "Invalid code point in string"));
        }

        char::from_u32(unit).ok_or_else(|| error_at(start, "Unpaired surrogate in string"))
    }

    fn number(&mut self) -> Result<Number, RelaxedError> {
        let start = self.pos;
        let mut text = String::new();
        let mut negative = false;
        if let Some(sign @ ('+' | '-')) = self.peek() {
            negative = sign == '-';
            self.bump();
        }

        if self.peek() == Some('0') {
            self.bump();
            if matches!(self.peek(), Some('x') | Some('X')) {
                self.bump();
                let mut hex = String::new();
                while let Some(d) = self.peek().filter(|d| d.is_ascii_hexdigit()) {
                    hex.push(d);
                    self.bump();
                }
                let value = i64::from_str_radix(&hex, 16)
                    .map_err(|_| error_at(start, "Invalid hexadecimal number"))?;
                return Ok(Number::from(if negative { -value } else { value }));
            }
            text.push('0');
        }

        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => text.push(c),
                '.' if !is_float => {
                    is_float = true;
                    text.push(c);
                }
                'e' | 'E' => {
                    is_float = true;
                    text.push(c);
                    self.bump();
                    if let Some(sign @ ('+' | '-')) = self.peek() {
                        text.push(sign);
                    } else {
                        continue;
                    }
                }
                _ => break,
            }
            self.bump();
        }

        if !text.chars().any(|c| c.is_ascii_digit()) {
            // "+Infinity", "-x" and a lone "." all land here
            return Err(error_at(start, "Invalid number"));
        }

        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(Number::from(if negative { -value } else { value }));
            }
        }
        let value: f64 = text
            .parse()
            .map_err(|_| error_at(start, format!("Invalid number '{}'", text)))?;
        let value = if negative { -value } else { value };
        Number::from_f64(value).ok_or_else(|| error_at(start, "Number is out of range"))
    }

    fn identifier(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }
}

fn decode_code_point(digits: &str, start: Pos) -> Result<char, RelaxedError> {
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| error_at(start, format!("Invalid escape sequence '{}'", digits)))
}

/// Nesting limit for objects and arrays, the same as serde_json's.
const MAX_DEPTH: usize = 128;

struct Parser {
    tokens: Vec<(Token, Pos)>,
    index: usize,
    end: Pos,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(t, _)| t)
    }

    fn next(&mut self) -> Result<(Token, Pos), RelaxedError> {
        let item = self
            .tokens
            .get(self.index)
            .cloned()
            .ok_or_else(|| error_at(self.end, "Unexpected end of input"))?;
        self.index += 1;
        Ok(item)
    }

    fn expect(&mut self, expected: Token) -> Result<(), RelaxedError> {
        let (token, pos) = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(error_at(
                pos,
                format!(
                    "Expected {} but found {}",
                    expected.describe(),
                    token.describe()
                ),
            ))
        }
    }

    fn document(&mut self) -> Result<Value, RelaxedError> {
        let value = if self.peek() == Some(&Token::LParen) {
            self.next()?;
            let inner = self.value()?;
            self.expect(Token::RParen)?;
            inner
        } else {
            self.value()?
        };
        while self.peek() == Some(&Token::Semicolon) {
            self.next()?;
        }
        if let Some((token, pos)) = self.tokens.get(self.index) {
            return Err(error_at(
                *pos,
                format!("Unexpected {} after value", token.describe()),
            ));
        }
        Ok(value)
    }

    fn value(&mut self) -> Result<Value, RelaxedError> {
        let (token, pos) = self.next()?;
        match token {
            Token::LBrace => self.nested(pos, Self::object),
            Token::LBracket => self.nested(pos, Self::array),
            Token::Str(s) => Ok(Value::String(s)),
            Token::Num(n) => Ok(Value::Number(n)),
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" | "undefined" => Ok(Value::Null),
                "NaN" | "Infinity" => Err(error_at(
                    pos,
                    format!("{} cannot be represented in JSON", name),
                )),
                _ => Err(error_at(pos, format!("Unexpected identifier '{}'", name))),
            },
            other => Err(error_at(pos, format!("Unexpected {}", other.describe()))),
        }
    }

    fn nested(
        &mut self,
        pos: Pos,
        body: fn(&mut Self) -> Result<Value, RelaxedError>,
    ) -> Result<Value, RelaxedError> {
        if self.depth >= MAX_DEPTH {
            return Err(error_at(pos, "Nesting is too deep"));
        }
        self.depth += 1;
        let value = body(self);
        self.depth -= 1;
        value
    }

    fn object(&mut self) -> Result<Value, RelaxedError> {
        let mut map = Map::new();
        loop {
            if self.peek() == Some(&Token::RBrace) {
                self.next()?;
                return Ok(Value::Object(map));
            }
            let (key_token, key_pos) = self.next()?;
            let key = match key_token {
                Token::Str(s) | Token::Ident(s) => s,
                Token::Num(n) => n.to_string(),
                other => {
                    return Err(error_at(
                        key_pos,
                        format!("Expected a property name but found {}", other.describe()),
                    ))
                }
            };
            self.expect(Token::Colon)?;
            let value = self.value()?;
            map.insert(key, value);

            let (token, pos) = self.next()?;
            match token {
                Token::Comma => continue,
                Token::RBrace => return Ok(Value::Object(map)),
                other => {
                    return Err(error_at(
                        pos,
                        format!("Expected ',' or '}}' but found {}", other.describe()),
                    ))
                }
            }
        }
    }

    fn array(&mut self) -> Result<Value, RelaxedError> {
        let mut items = Vec::new();
        loop {
            if self.peek() == Some(&Token::RBracket) {
                self.next()?;
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);

            let (token, pos) = self.next()?;
            match token {
                Token::Comma => continue,
                Token::RBracket => return Ok(Value::Array(items)),
                other => {
                    return Err(error_at(
                        pos,
                        format!("Expected ',' or ']' but found {}", other.describe()),
                    ))
                }
            }
        }
    }
}

pub fn parse(input: &str) -> Result<Value, RelaxedError> {
    let (tokens, end) = Lexer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(error_at(end, "Unexpected end of input"));
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        end,
        depth: 0,
    };
    parser.document()
}
