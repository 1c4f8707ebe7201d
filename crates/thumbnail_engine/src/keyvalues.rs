use std::iter::Peekable;
use std::str::Chars;

use crate::InputError;

/// A node of a Valve KeyValues document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvValue {
    Text(String),
    Block(Vec<(String, KvValue)>),
}

impl KvValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            KvValue::Text(text) => Some(text),
            KvValue::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&[(String, KvValue)]> {
        match self {
            KvValue::Block(pairs) => Some(pairs),
            KvValue::Text(_) => None,
        }
    }

    /// Child lookup ignoring ASCII case; a repeated key resolves to its last occurrence.
    pub fn get(&self, key: &str) -> Option<&KvValue> {
        self.as_block().and_then(|pairs| lookup(pairs, key))
    }
}

pub(crate) fn lookup<'a>(pairs: &'a [(String, KvValue)], key: &str) -> Option<&'a KvValue> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Str(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> InputError {
        InputError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    /// Next significant token; `[$CONDITION]` markers and `//` comments are skipped.
    fn next_token(&mut self) -> Result<Option<Token>, InputError> {
        loop {
            let Some(&c) = self.chars.peek() else {
                return Ok(None);
            };
            match c {
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                '{' => {
                    self.bump();
                    return Ok(Some(Token::Open));
                }
                '}' => {
                    self.bump();
                    return Ok(Some(Token::Close));
                }
                '"' => {
                    self.bump();
                    return self.quoted().map(|s| Some(Token::Str(s)));
                }
                '[' => self.skip_condition()?,
                '/' => {
                    self.bump();
                    if self.chars.peek() == Some(&'/') {
                        self.skip_line();
                    } else {
                        let mut rest = self.bare();
                        rest.insert(0, '/');
                        return Ok(Some(Token::Str(rest)));
                    }
                }
                _ => return Ok(Some(Token::Str(self.bare()))),
            }
        }
    }

    fn quoted(&mut self) -> Result<String, InputError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn bare(&mut self) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '{' | '}' | '"') {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn skip_condition(&mut self) -> Result<(), InputError> {
        while let Some(c) = self.bump() {
            if c == ']' {
                return Ok(());
            }
        }
        Err(self.error("unterminated conditional"))
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }
}

/// Deepest block nesting accepted; matches the JSON parser's recursion limit.
const MAX_DEPTH: usize = 128;

/// Parse a KeyValues text document into its top-level pairs.
pub fn parse_keyvalues(text: &str) -> Result<Vec<(String, KvValue)>, InputError> {
    let mut lexer = Lexer::new(text);
    parse_pairs(&mut lexer, 0)
}

/// `depth` is 0 at the document root.
fn parse_pairs(lexer: &mut Lexer<'_>, depth: usize) -> Result<Vec<(String, KvValue)>, InputError> {
    if depth > MAX_DEPTH {
        return Err(lexer.error("nesting too deep"));
    }
    let nested = depth > 0;
    let mut pairs = Vec::new();
    loop {
        let key = match lexer.next_token()? {
            None if nested => return Err(lexer.error("missing '}' before end of input")),
            None => return Ok(pairs),
            Some(Token::Close) if nested => return Ok(pairs),
            Some(Token::Close) => return Err(lexer.error("unexpected '}'")),
            Some(Token::Open) => return Err(lexer.error("expected a key, found '{'")),
            Some(Token::Str(key)) => key,
        };
        let value = match lexer.next_token()? {
            Some(Token::Str(text)) => KvValue::Text(text),
            Some(Token::Open) => KvValue::Block(parse_pairs(lexer, depth + 1)?),
            Some(Token::Close) | None => {
                return Err(lexer.error(format!("missing value for key '{key}'")))
            }
        };
        pairs.push((key, value));
    }
}
