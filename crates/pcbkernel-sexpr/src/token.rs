//! Splits S-expression source text into a flat token stream.
//!
//! Tokens carry their own source location so the tree parser can attach
//! precise error locations without re-scanning.

use crate::error::{Location, SExprError, SExprResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    /// An identifier or bare number: letters, digits and
    /// `` -_./+!?@#$%&*<>=: `` with no surrounding quotes.
    Atom(String),
    /// A double-quoted string with `\"`/`\\` escapes already resolved.
    QuotedString(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

fn is_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-_./+!?@#$%&*<>=:".contains(c)
}

/// Tokenizes `source` in full before parsing begins, the simplest faithful
/// rendition of the tokenize-then-parse split described by the file format.
pub fn tokenize(source: &str) -> SExprResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let mut column = 1usize;
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0usize;

    let mut advance = |i: &mut usize, line: &mut usize, column: &mut usize| {
        if chars[*i] == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
        *i += 1;
    };

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            advance(&mut i, &mut line, &mut column);
            continue;
        }
        if c == ';' {
            while i < chars.len() && chars[i] != '\n' {
                advance(&mut i, &mut line, &mut column);
            }
            continue;
        }
        let start = Location { line, column };
        match c {
            '(' => {
                tokens.push(Token { kind: TokenKind::LParen, location: start });
                advance(&mut i, &mut line, &mut column);
            }
            ')' => {
                tokens.push(Token { kind: TokenKind::RParen, location: start });
                advance(&mut i, &mut line, &mut column);
            }
            '"' => {
                advance(&mut i, &mut line, &mut column);
                let mut value = String::new();
                let mut closed = false;
                while i < chars.len() {
                    match chars[i] {
                        '"' => {
                            advance(&mut i, &mut line, &mut column);
                            closed = true;
                            break;
                        }
                        '\\' if i + 1 < chars.len() => {
                            advance(&mut i, &mut line, &mut column);
                            let escaped = chars[i];
                            value.push(match escaped {
                                'n' => '\n',
                                't' => '\t',
                                other => other,
                            });
                            advance(&mut i, &mut line, &mut column);
                        }
                        other => {
                            value.push(other);
                            advance(&mut i, &mut line, &mut column);
                        }
                    }
                }
                if !closed {
                    return Err(SExprError::UnexpectedEof {
                        location: start,
                        context: "quoted string".to_string(),
                    });
                }
                tokens.push(Token { kind: TokenKind::QuotedString(value), location: start });
            }
            _ if is_atom_char(c) => {
                let mut value = String::new();
                while i < chars.len() && is_atom_char(chars[i]) {
                    value.push(chars[i]);
                    advance(&mut i, &mut line, &mut column);
                }
                tokens.push(Token { kind: TokenKind::Atom(value), location: start });
            }
            other => {
                return Err(SExprError::malformed(start, format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_simple_list() {
        let tokens = tokenize("(junction abc \"hi there\")").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].kind, TokenKind::LParen);
        assert_eq!(tokens[1].kind, TokenKind::Atom("junction".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Atom("abc".to_string()));
        assert_eq!(tokens[3].kind, TokenKind::QuotedString("hi there".to_string()));
        assert_eq!(tokens[4].kind, TokenKind::RParen);
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("(a\n (b))").unwrap();
        let b_token = tokens.iter().find(|t| t.kind == TokenKind::Atom("b".to_string())).unwrap();
        assert_eq!(b_token.location.line, 2);
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(tokenize("(a \"unterminated)").is_err());
    }

    #[test]
    fn skips_line_comments() {
        let tokens = tokenize("(a ; a comment\n b)").unwrap();
        assert_eq!(tokens.len(), 4);
    }
}
