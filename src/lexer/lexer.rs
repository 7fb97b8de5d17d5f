use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<Token, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

// Order is priority: the first pattern matching at the cursor wins.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];

    // Whitespace and `//` line comments
    static ref SKIP_PATTERNS: Vec<Regex> = vec![
        Regex::new("^\\s+").unwrap(),
        Regex::new("^//[^\\n]*").unwrap(),
    ];
}

/// Lazily produces tokens from a source string.
///
/// The cursor only ever moves forward, and once the end of input is reached
/// every further call to [`Lexer::next_token`] yields another EOF token.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Arc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("<source>"))
        };

        Lexer {
            pos: 0,
            source,
            file: file_name,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_trivia();

        if self.at_eof() {
            return Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0)));
        }

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                return (pattern.handler)(self, &pattern.regex);
            }
        }

        Err(Error::new(ErrorImpl::UnrecognisedToken { token: self.at().to_string() }, self.get_position()))
    }

    fn skip_trivia(&mut self) {
        loop {
            let mut skipped = false;

            for regex in SKIP_PATTERNS.iter() {
                if let Some(end) = regex.find(self.remainder()).map(|m| m.end()) {
                    self.advance_n(end);
                    skipped = true;
                }
            }

            if !skipped {
                break;
            }
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position(self.pos, Arc::clone(&self.file))
    }

    pub fn get_file(&self) -> Arc<String> {
        Arc::clone(&self.file)
    }

    /// Span covering the next `len` bytes from the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos, Arc::clone(&self.file)),
            end: Position(self.pos + len, Arc::clone(&self.file)),
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Token, Error> {
    let matched = match regex.find(lexer.remainder()) {
        Some(m) => m.as_str().to_string(),
        None => return Err(Error::new(ErrorImpl::UnrecognisedToken { token: lexer.at().to_string() }, lexer.get_position())),
    };

    let token = MK_TOKEN!(TokenKind::Number, matched.clone(), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Ok(token)
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Token, Error> {
    let mut result = String::new();
    let mut closing = None;

    // Skip the opening quote
    let mut chars = lexer.remainder()[1..].char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '"' => {
                closing = Some(index);
                break;
            }
            '\\' => match chars.peek().map(|(_, next)| *next) {
                Some('n') => {
                    result.push('\n');
                    chars.next();
                }
                Some('t') => {
                    result.push('\t');
                    chars.next();
                }
                Some('r') => {
                    result.push('\r');
                    chars.next();
                }
                Some('\\') => {
                    result.push('\\');
                    chars.next();
                }
                Some('"') => {
                    result.push('"');
                    chars.next();
                }
                Some('0') => {
                    result.push('\0');
                    chars.next();
                }
                Some('x') => {
                    chars.next();
                    let mut hex = String::new();

                    while hex.len() < 2 {
                        match chars.peek() {
                            Some((_, digit)) if digit.is_ascii_hexdigit() => {
                                hex.push(*digit);
                                chars.next();
                            }
                            _ => break,
                        }
                    }

                    match u8::from_str_radix(&hex, 16) {
                        Ok(byte) => result.push(byte as char),
                        Err(_) => {
                            result.push_str("\\x");
                            result.push_str(&hex);
                        }
                    }
                }
                _ => result.push(ch), // Keep the backslash
            },
            _ => result.push(ch),
        }
    }

    let Some(closing) = closing else {
        return Err(Error::new(ErrorImpl::UnterminatedString, lexer.get_position()));
    };

    // Opening quote, contents, closing quote
    let length = closing + 2;
    let token = MK_TOKEN!(TokenKind::String, result, lexer.span_of(length));
    lexer.advance_n(length);
    Ok(token)
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Token, Error> {
    let value = match regex.find(lexer.remainder()) {
        Some(m) => m.as_str().to_string(),
        None => return Err(Error::new(ErrorImpl::UnrecognisedToken { token: lexer.at().to_string() }, lexer.get_position())),
    };

    let kind = match RESERVED_LOOKUP.get(value.as_str()) {
        Some(kind) => *kind,
        None => TokenKind::Identifier,
    };

    let token = MK_TOKEN!(kind, value.clone(), lexer.span_of(value.len()));
    lexer.advance_n(value.len());
    Ok(token)
}

/// Drains a lexer over `source` into a vector ending with the EOF token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let at_end = token.kind == TokenKind::EOF;
        tokens.push(token);

        if at_end {
            break;
        }
    }

    Ok(tokens)
}
