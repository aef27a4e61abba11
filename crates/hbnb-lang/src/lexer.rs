//! Lexer for console input using logos.
//!
//! The lexer splits a line into shell-style pieces (bare text, quoted text,
//! backslash escapes) plus the punctuation the method-call form needs.
//! Pieces with no whitespace between them belong to the same shell word;
//! [`words`] performs that grouping.

use crate::error::ParseError;
use crate::span::Span;
use logos::Logos;

/// Token types for console input.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Bare text, stopping at whitespace, quotes, escapes and punctuation
    #[regex(r#"[^ \t\r\n\f.(),{}'"\\]+"#, |lex| lex.slice().to_string())]
    Text(String),

    // Double-quoted text; backslash escapes only `"` and `\`
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape_double(&s[1..s.len() - 1])
    })]
    DoubleQuoted(String),

    // Single-quoted text is literal
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    SingleQuoted(String),

    // Backslash-escaped character outside quotes
    #[regex(r"\\[^\n]", |lex| lex.slice()[1..].to_string())]
    Escaped(String),

    // Punctuation
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

impl Token {
    /// The text this token contributes to a shell word.
    pub fn text(&self) -> &str {
        match self {
            Token::Text(s) | Token::DoubleQuoted(s) | Token::SingleQuoted(s) | Token::Escaped(s) => s,
            Token::Dot => ".",
            Token::Comma => ",",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
        }
    }

    /// Whether this token came from a quoted string.
    pub fn is_quoted(&self) -> bool {
        matches!(self, Token::DoubleQuoted(_) | Token::SingleQuoted(_))
    }
}

/// Unescape the body of a double-quoted string.
fn unescape_double(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') | Some('\\') => {
                    if let Some(escaped) = chars.next() {
                        result.push(escaped);
                    }
                }
                _ => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// A token with its span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// A shell word assembled from adjacent tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// Text with quotes removed and escapes applied.
    pub text: String,
    /// Whether any part of the word was quoted.
    pub quoted: bool,
    /// Source span of the whole word.
    pub span: Span,
}

/// Tokenize a line, failing on the first unlexable input.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span: Span = lexer.span().into();
        match result {
            Ok(token) => tokens.push(SpannedToken { token, span }),
            Err(()) => return Err(ParseError::lexical(source, span)),
        }
    }

    Ok(tokens)
}

/// Group tokens into shell words: a new word starts after whitespace.
pub fn words(tokens: &[SpannedToken]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();

    for tok in tokens {
        match words.last_mut() {
            Some(word) if word.span.touches(&tok.span) => {
                word.text.push_str(tok.token.text());
                word.quoted |= tok.token.is_quoted();
                word.span = word.span.merge(tok.span);
            }
            _ => words.push(Word {
                text: tok.token.text().to_string(),
                quoted: tok.token.is_quoted(),
                span: tok.span,
            }),
        }
    }

    words
}
