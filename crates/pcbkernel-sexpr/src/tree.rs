//! The `SExpr` tree: parsing from tokens and pretty-printing back to text.

use std::fmt::Write as _;

use crate::error::{Location, SExprError, SExprResult};
use crate::token::{tokenize, Token, TokenKind};

/// A parsed S-expression node.
///
/// Lists remember whether each child was followed by a line break in the
/// source (or, when freshly built, whether the writer asked for one before
/// it), so round-tripping a file preserves its layout instead of collapsing
/// everything onto one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    Atom(String),
    QuotedString(String),
    List(ListNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    /// Children in order, each paired with whether a line break follows it.
    pub children: Vec<(SExpr, bool)>,
    pub location: Location,
}

impl SExpr {
    pub fn atom(value: impl Into<String>) -> Self {
        SExpr::Atom(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        SExpr::QuotedString(value.into())
    }

    pub fn list(tag: impl Into<String>) -> Self {
        SExpr::List(ListNode {
            children: vec![(SExpr::Atom(tag.into()), false)],
            location: Location::default(),
        })
    }

    pub fn location(&self) -> Location {
        match self {
            SExpr::List(list) => list.location,
            _ => Location::default(),
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SExpr::QuotedString(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            SExpr::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListNode> {
        match self {
            SExpr::List(list) => Some(list),
            _ => None,
        }
    }

    /// The tag atom of a list, i.e. `foo` in `(foo ...)`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list().and_then(|l| l.children.first()).and_then(|(c, _)| c.as_atom())
    }

    /// Appends `child` as a bare value with no forced line break.
    pub fn push(&mut self, child: SExpr) -> &mut Self {
        if let Some(list) = self.as_list_mut() {
            list.children.push((child, false));
        }
        self
    }

    /// Appends `child`, requesting a line break after it in the pretty printer.
    pub fn push_line(&mut self, child: SExpr) -> &mut Self {
        if let Some(list) = self.as_list_mut() {
            list.children.push((child, true));
        }
        self
    }

    /// Builds and appends a `(name value)` pair list, e.g. `(width 0.2)`.
    pub fn push_field(&mut self, name: &str, value: SExpr) -> &mut Self {
        let mut field = SExpr::list(name);
        field.push(value);
        self.push(field);
        self
    }

    pub fn push_field_line(&mut self, name: &str, value: SExpr) -> &mut Self {
        let mut field = SExpr::list(name);
        field.push(value);
        self.push_line(field);
        self
    }

    /// All list children after the tag atom.
    pub fn children(&self) -> &[(SExpr, bool)] {
        self.as_list().map(|l| l.children.as_slice()).unwrap_or(&[])
    }

    /// All list children whose tag atom equals `name`.
    pub fn children_tagged<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SExpr> + 'a {
        self.children().iter().skip(1).map(|(c, _)| c).filter(move |c| c.tag() == Some(name))
    }

    /// The first child tagged `name`, if present.
    pub fn child(&self, name: &str) -> Option<&SExpr> {
        self.children_tagged(name).next()
    }

    /// Bare (non-tagged-list) atom/string children after the tag, in order.
    pub fn positional(&self) -> impl Iterator<Item = &SExpr> {
        self.children().iter().skip(1).map(|(c, _)| c).filter(|c| !matches!(c, SExpr::List(_)))
    }

    /// Every child after the tag, regardless of kind. Used for heterogeneous
    /// or homogeneous-but-generic element lists (e.g. `TypedList<T>`) where
    /// the caller, not the tag, knows how to decode each one.
    pub fn elements(&self) -> impl Iterator<Item = &SExpr> {
        self.children().iter().skip(1).map(|(c, _)| c)
    }
}

/// Parses a full document, returning the top-level list of expressions
/// (conventionally a single root list).
pub fn parse(source: &str) -> SExprResult<SExpr> {
    let tokens = tokenize(source)?;
    let mut pos = 0usize;
    let expr = parse_expr(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(SExprError::malformed(
            tokens[pos].location,
            "trailing content after top-level expression",
        ));
    }
    Ok(expr)
}

fn parse_expr(tokens: &[Token], pos: &mut usize) -> SExprResult<SExpr> {
    let token = tokens.get(*pos).ok_or_else(|| SExprError::UnexpectedEof {
        location: tokens.last().map(|t| t.location).unwrap_or_default(),
        context: "expression".to_string(),
    })?;
    match &token.kind {
        TokenKind::Atom(value) => {
            *pos += 1;
            Ok(SExpr::Atom(value.clone()))
        }
        TokenKind::QuotedString(value) => {
            *pos += 1;
            Ok(SExpr::QuotedString(value.clone()))
        }
        TokenKind::RParen => Err(SExprError::malformed(token.location, "unexpected ')'")),
        TokenKind::LParen => {
            let location = token.location;
            *pos += 1;
            let mut children = Vec::new();
            loop {
                match tokens.get(*pos) {
                    None => {
                        return Err(SExprError::UnexpectedEof { location, context: "list".to_string() })
                    }
                    Some(t) if t.kind == TokenKind::RParen => {
                        *pos += 1;
                        break;
                    }
                    _ => {
                        let child = parse_expr(tokens, pos)?;
                        let end_line = tokens[*pos - 1].location.line;
                        let followed_by_break =
                            tokens.get(*pos).map(|next| next.location.line > end_line).unwrap_or(false);
                        children.push((child, followed_by_break));
                    }
                }
            }
            Ok(SExpr::List(ListNode { children, location }))
        }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || "-_./+!?@#$%&*<>=:".contains(c))
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Pretty-prints `expr` back to S-expression text, honoring each list's
/// line-break hints and indenting nested lists by two spaces.
pub fn format(expr: &SExpr) -> String {
    let mut out = String::new();
    write_expr(expr, 0, &mut out);
    out.push('\n');
    out
}

fn write_expr(expr: &SExpr, indent: usize, out: &mut String) {
    match expr {
        SExpr::Atom(value) => {
            let _ = write!(out, "{value}");
        }
        SExpr::QuotedString(value) => {
            let _ = write!(out, "\"{}\"", escape(value));
        }
        SExpr::List(list) => {
            out.push('(');
            let mut first = true;
            for (i, (child, line_break)) in list.children.iter().enumerate() {
                if !first {
                    if list.children[i - 1].1 {
                        out.push('\n');
                        out.push_str(&" ".repeat((indent + 1) * 2));
                    } else {
                        out.push(' ');
                    }
                }
                first = false;
                write_expr(child, indent + 1, out);
                let _ = line_break;
            }
            out.push(')');
        }
    }
}

/// Convenience: re-quote an atom if it isn't safely printable bare.
pub fn atom_or_quoted(value: &str) -> SExpr {
    if needs_quotes(value) {
        SExpr::QuotedString(value.to_string())
    } else {
        SExpr::Atom(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_lists() {
        let expr = parse("(junction (position 1.0 2.0) (uuid abc))").unwrap();
        let list = expr.as_list().unwrap();
        assert_eq!(list.children.len(), 3);
        assert_eq!(expr.tag(), Some("junction"));
        let position = expr.child("position").unwrap();
        assert_eq!(position.positional().count(), 2);
    }

    #[test]
    fn round_trips_through_format() {
        let source = "(a (b 1) (c \"hi\"))";
        let expr = parse(source).unwrap();
        let printed = format(&expr);
        let reparsed = parse(&printed).unwrap();
        assert_eq!(expr, reparsed);
    }

    #[test]
    fn quotes_strings_needing_escapes() {
        let mut root = SExpr::list("name");
        root.push(SExpr::string("needs \"quotes\""));
        let printed = format(&root);
        assert!(printed.contains("\\\""));
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert!(parse("(a (b)").is_err());
        assert!(parse("(a))").is_err());
    }

    #[test]
    fn preserves_line_breaks_between_children() {
        let source = "(root\n (a 1)\n (b 2)\n)";
        let expr = parse(source).unwrap();
        let list = expr.as_list().unwrap();
        assert!(list.children[1].1, "a 1 should be followed by a line break");
    }
}
