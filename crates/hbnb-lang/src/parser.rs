//! Parser for console input.
//!
//! A line is either a method call, `<Kind>.<operation>(<args>)`, or a
//! space-separated command, `<operation> <kind> [<id>] [<attr>] [<value>]`.
//! The method-call form is recognized by its first four tokens: two words
//! joined by a dot and immediately followed by an opening parenthesis.

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{tokenize, words, SpannedToken, Token, Word};
use crate::span::Span;
use hbnb_core::Value;

/// Parser for one line of console input.
pub struct Parser<'source> {
    source: &'source str,
    tokens: Vec<SpannedToken>,
}

impl<'source> Parser<'source> {
    /// Tokenize `source` and create a parser over it.
    pub fn new(source: &'source str) -> Result<Self, ParseError> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
        })
    }

    /// Parse the line into a statement.
    pub fn parse_statement(&self) -> Result<Statement, ParseError> {
        if self.tokens.is_empty() {
            return Ok(Statement::Empty);
        }
        if self.is_method_call() {
            self.parse_method_call()
        } else {
            self.parse_command()
        }
    }

    fn is_method_call(&self) -> bool {
        match self.tokens.as_slice() {
            [kind, dot, op, open, ..] => {
                is_identifier(&kind.token)
                    && dot.token == Token::Dot
                    && is_identifier(&op.token)
                    && open.token == Token::LParen
                    && kind.span.touches(&dot.span)
                    && dot.span.touches(&op.span)
                    && op.span.touches(&open.span)
            }
            _ => false,
        }
    }

    /// Parse `<operation> <kind> [<id>] [<attr>] [<value>] ...`.
    fn parse_command(&self) -> Result<Statement, ParseError> {
        let mut words = words(&self.tokens).into_iter();
        let head = match words.next() {
            Some(w) => w,
            None => return Ok(Statement::Empty),
        };

        if !head.quoted {
            match head.text.as_str() {
                "quit" => return Ok(Statement::Quit),
                "EOF" => return Ok(Statement::Eof),
                "help" => return Ok(Statement::Help(words.next().map(|w| w.text))),
                _ => {}
            }
        }

        let operation = Operation::from_name(&head.text)
            .filter(|_| !head.quoted)
            .ok_or_else(|| ParseError::unknown_syntax(self.source))?;

        let kind = words.next().map(|w| w.text);
        let id = words.next().map(|w| w.text);
        let attribute = words.next().map(|w| w.text);
        let value = words.next().map(word_value);

        Ok(Statement::Invocation(Invocation {
            operation,
            syntax: Syntax::Command,
            kind,
            args: Arguments::Positional {
                id,
                attribute,
                value,
            },
        }))
    }

    /// Parse `<Kind>.<operation>(<args>)`.
    fn parse_method_call(&self) -> Result<Statement, ParseError> {
        let tokens = &self.tokens;
        let unknown = || ParseError::unknown_syntax(self.source);

        match tokens.last() {
            Some(last) if last.token == Token::RParen && tokens.len() >= 5 => {}
            _ => return Err(unknown()),
        }

        let kind = tokens[0].token.text().to_string();
        let operation = Operation::from_name(tokens[2].token.text()).ok_or_else(unknown)?;

        let inner = &tokens[4..tokens.len() - 1];
        let groups = split_arguments(inner);
        let mut groups = groups.into_iter();

        let id = groups.next().and_then(|g| self.group_word(g)).map(|w| w.text);
        let second = groups.next().unwrap_or(&[]);

        let args = match (id, second.first()) {
            (Some(id), Some(first)) if first.token == Token::LBrace => Arguments::Dictionary {
                id,
                literal: self.dictionary(second),
            },
            (id, _) => Arguments::Positional {
                id,
                attribute: self.group_word(second).map(|w| w.text),
                value: groups
                    .next()
                    .and_then(|g| self.group_word(g))
                    .map(word_value),
            },
        };

        Ok(Statement::Invocation(Invocation {
            operation,
            syntax: Syntax::MethodCall,
            kind: Some(kind),
            args,
        }))
    }

    /// Collapse one comma-separated argument into a word.
    ///
    /// A lone quoted token keeps its unquoted content; anything else is
    /// taken verbatim from the source.
    fn group_word(&self, group: &[SpannedToken]) -> Option<Word> {
        let (first, last) = (group.first()?, group.last()?);
        if group.len() == 1 && first.token.is_quoted() {
            return Some(Word {
                text: first.token.text().to_string(),
                quoted: true,
                span: first.span,
            });
        }
        let span = first.span.merge(last.span);
        Some(Word {
            text: span.slice(self.source).to_string(),
            quoted: false,
            span,
        })
    }

    /// Parse a `{...}` argument, normalizing single quotes to double quotes.
    fn dictionary(&self, group: &[SpannedToken]) -> DictLiteral {
        let span = match (group.first(), group.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::default(),
        };
        let text = span.slice(self.source);
        if group.last().map(|t| &t.token) != Some(&Token::RBrace) {
            return DictLiteral::Invalid(text.to_string());
        }

        match serde_json::from_str::<serde_json::Value>(&text.replace('\'', "\"")) {
            Ok(serde_json::Value::Object(map)) => DictLiteral::Valid(
                map.into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect(),
            ),
            _ => DictLiteral::Invalid(text.to_string()),
        }
    }
}

/// Parse one line of input.
pub fn parse(source: &str) -> Result<Statement, ParseError> {
    Parser::new(source)?.parse_statement()
}

/// Quoted words stay strings; bare words are inferred as numbers when they
/// look like one.
fn word_value(word: Word) -> Value {
    if word.quoted {
        Value::String(word.text)
    } else {
        Value::infer(&word.text)
    }
}

fn is_identifier(token: &Token) -> bool {
    match token {
        Token::Text(s) => {
            let mut chars = s.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Split method-call arguments on commas outside braces.
fn split_arguments(tokens: &[SpannedToken]) -> Vec<&[SpannedToken]> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, tok) in tokens.iter().enumerate() {
        match tok.token {
            Token::LBrace => depth += 1,
            Token::RBrace => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                groups.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&tokens[start..]);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use pretty_assertions::assert_eq;

    fn invocation(source: &str) -> Invocation {
        match parse(source).unwrap() {
            Statement::Invocation(inv) => inv,
            other => panic!("expected invocation, got {:?}", other),
        }
    }

    fn positional(
        id: Option<&str>,
        attribute: Option<&str>,
        value: Option<Value>,
    ) -> Arguments {
        Arguments::Positional {
            id: id.map(str::to_string),
            attribute: attribute.map(str::to_string),
            value,
        }
    }

    #[test]
    fn test_blank_and_terminal_lines() {
        assert_eq!(parse("").unwrap(), Statement::Empty);
        assert_eq!(parse("   \t").unwrap(), Statement::Empty);
        assert_eq!(parse("quit").unwrap(), Statement::Quit);
        assert_eq!(parse("quit now").unwrap(), Statement::Quit);
        assert_eq!(parse("EOF").unwrap(), Statement::Eof);
        assert_eq!(parse("help").unwrap(), Statement::Help(None));
        assert_eq!(
            parse("help show").unwrap(),
            Statement::Help(Some("show".to_string()))
        );
    }

    #[test]
    fn test_command_form() {
        let inv = invocation(r#"update Place 1234 name "My house""#);
        assert_eq!(inv.operation, Operation::Update);
        assert_eq!(inv.syntax, Syntax::Command);
        assert_eq!(inv.kind.as_deref(), Some("Place"));
        assert_eq!(
            inv.args,
            positional(Some("1234"), Some("name"), Some(Value::from("My house")))
        );
    }

    #[test]
    fn test_command_form_missing_arguments() {
        let inv = invocation("create");
        assert_eq!(inv.kind, None);
        assert_eq!(inv.args, Arguments::none());

        let inv = invocation("update User 42");
        assert_eq!(inv.args, positional(Some("42"), None, None));
    }

    #[test]
    fn test_command_value_inference() {
        let inv = invocation("update Place 1 number_rooms 4");
        assert_eq!(inv.args, positional(Some("1"), Some("number_rooms"), Some(Value::Int(4))));

        let inv = invocation("update Place 1 code \"4\"");
        assert_eq!(inv.args, positional(Some("1"), Some("code"), Some(Value::from("4"))));
    }

    #[test]
    fn test_method_call_without_arguments() {
        let inv = invocation("User.all()");
        assert_eq!(inv.operation, Operation::All);
        assert_eq!(inv.syntax, Syntax::MethodCall);
        assert_eq!(inv.kind.as_deref(), Some("User"));
        assert_eq!(inv.args, Arguments::none());

        let inv = invocation("City.count()");
        assert_eq!(inv.operation, Operation::Count);
    }

    #[test]
    fn test_method_call_with_id() {
        let inv = invocation("User.show(38f22813-2753-4d42-b37c-57a17f1e4f88)");
        assert_eq!(
            inv.args,
            positional(Some("38f22813-2753-4d42-b37c-57a17f1e4f88"), None, None)
        );

        let inv = invocation(r#"User.destroy("abc")"#);
        assert_eq!(inv.args, positional(Some("abc"), None, None));
    }

    #[test]
    fn test_method_call_attribute_value() {
        let inv = invocation("User.update(abc, first_name, 'John Smith')");
        assert_eq!(
            inv.args,
            positional(Some("abc"), Some("first_name"), Some(Value::from("John Smith")))
        );

        let inv = invocation("Place.update(abc, \"latitude\", 37.5)");
        assert_eq!(
            inv.args,
            positional(Some("abc"), Some("latitude"), Some(Value::Float(37.5)))
        );

        let inv = invocation("User.update(abc, name)");
        assert_eq!(inv.args, positional(Some("abc"), Some("name"), None));
    }

    #[test]
    fn test_method_call_dictionary() {
        let inv = invocation(r#"User.update(abc, {'first_name': "John", "age": 89, "tags": ["a"]})"#);
        assert_eq!(
            inv.args,
            Arguments::Dictionary {
                id: "abc".to_string(),
                literal: DictLiteral::Valid(vec![
                    ("first_name".to_string(), Value::from("John")),
                    ("age".to_string(), Value::Int(89)),
                    ("tags".to_string(), Value::List(vec![Value::from("a")])),
                ]),
            }
        );
    }

    #[test]
    fn test_method_call_invalid_dictionary() {
        let inv = invocation("User.update(abc, {first_name: John})");
        assert!(matches!(
            inv.args,
            Arguments::Dictionary {
                literal: DictLiteral::Invalid(ref text),
                ..
            } if text == "{first_name: John}"
        ));

        let inv = invocation("User.update(abc, {'a': 1)");
        assert!(matches!(
            inv.args,
            Arguments::Dictionary {
                literal: DictLiteral::Invalid(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_kind_still_parses() {
        let inv = invocation("NonExistingClass.all()");
        assert_eq!(inv.kind.as_deref(), Some("NonExistingClass"));
    }

    #[test]
    fn test_unknown_syntax() {
        for line in [
            "frobnicate User",
            "User.frobnicate()",
            "User.all",
            "User.all() trailing",
            "User.all(",
            "\"create\" User",
        ] {
            let err = parse(line).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::UnknownSyntax, "line: {}", line);
        }
    }

    #[test]
    fn test_unclosed_quote() {
        let err = parse("update User 1 name \"John").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
        assert_eq!(err.to_string(), "no closing quotation");
    }

    #[test]
    fn test_split_arguments_respects_braces() {
        let tokens = tokenize(r#"a, {"x": 1, "y": 2}, c"#).unwrap();
        let groups = split_arguments(&tokens);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].len(), 9);
    }
}
