// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! A recursive descent parser for the printed constraint syntax. The grammar
//! is exactly what the `Display` impls emit, so parsing round-trips the
//! printer; tests and callers use it to write constraints as text.
//!
//! A parenthesis at the head of a comparison is ambiguous: it may group a
//! proposition (`(a == 0 || b == 0) && c == 0`) or an expression
//! (`(a + b) * c == 0`). The parser tries the proposition reading first and
//! rewinds on failure; everything else is single-token lookahead.


use crate::{
    span::Span,
    term::{Expr, Name, Prop},
};
use enum_iterator::{all, Sequence};
use miette::Diagnostic;
use num_bigint::BigUint;
use std::{
    fmt::{self, Display, Formatter},
    result,
    str::FromStr,
};
use szc_infnat::InfNat;
use thiserror::Error;

type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Diagnostic, Eq, Error, PartialEq)]
#[error(transparent)]
#[diagnostic(transparent)]
pub struct Error(ErrorKind);

#[derive(Clone, Copy, Debug, Diagnostic, Eq, Error, PartialEq)]
enum ErrorKind {
    #[error("unexpected character `{0}`")]
    #[diagnostic(code("Szc.Parse.Char"))]
    Char(char, #[label] Span),
    #[error("invalid numeric literal")]
    #[diagnostic(code("Szc.Parse.Lit"))]
    Lit(#[label] Span),
    #[error("invalid variable name")]
    #[diagnostic(
        code("Szc.Parse.Var"),
        help("variables are a lowercase letter with an optional index, like `a` or `b1`")
    )]
    Var(#[label] Span),
    #[error("expected {0}, found {1}")]
    #[diagnostic(code("Szc.Parse.Token"))]
    Token(TokenKind, TokenKind, #[label] Span),
    #[error("expected {0}, found {1}")]
    #[diagnostic(code("Szc.Parse.Rule"))]
    Rule(&'static str, TokenKind, #[label] Span),
}

/// Parses an expression, consuming the whole input.
pub fn parse_expr(input: &str) -> Result<Expr> {
    let mut parser = Parser::new(input)?;
    let expr = expr(&mut parser)?;
    parser.expect(TokenKind::Eof)?;
    Ok(expr)
}

/// Parses a proposition, consuming the whole input.
pub fn parse_prop(input: &str) -> Result<Prop> {
    let mut parser = Parser::new(input)?;
    let prop = prop(&mut parser)?;
    parser.expect(TokenKind::Eof)?;
    Ok(prop)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
enum TokenKind {
    /// `&&`
    AmpAmp,
    /// `||`
    BarBar,
    /// `^^`
    CaretCaret,
    /// `)`
    Close,
    /// `:==:`
    ColonEq,
    /// `:>:`
    ColonGt,
    /// The end of the input.
    Eof,
    /// `==`
    EqEq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// An identifier or keyword.
    Ident,
    /// `-`
    Minus,
    /// A numeric literal.
    Number,
    /// `(`
    Open,
    /// `+`
    Plus,
    /// `*`
    Star,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            TokenKind::AmpAmp => "`&&`",
            TokenKind::BarBar => "`||`",
            TokenKind::CaretCaret => "`^^`",
            TokenKind::Close => "`)`",
            TokenKind::ColonEq => "`:==:`",
            TokenKind::ColonGt => "`:>:`",
            TokenKind::Eof => "end of input",
            TokenKind::EqEq => "`==`",
            TokenKind::Gt => "`>`",
            TokenKind::Gte => "`>=`",
            TokenKind::Ident => "identifier",
            TokenKind::Minus => "`-`",
            TokenKind::Number => "number",
            TokenKind::Open => "`(`",
            TokenKind::Plus => "`+`",
            TokenKind::Star => "`*`",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Token {
    kind: TokenKind,
    span: Span,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
enum Keyword {
    Div,
    False,
    Fin,
    Inf,
    LenFromThen,
    LenFromThenTo,
    Lg2,
    Max,
    Min,
    Mod,
    Not,
    True,
    Width,
}

impl Keyword {
    fn as_str(self) -> &'static str {
        match self {
            Keyword::Div => "div",
            Keyword::False => "False",
            Keyword::Fin => "fin",
            Keyword::Inf => "inf",
            Keyword::LenFromThen => "lenFromThen",
            Keyword::LenFromThenTo => "lenFromThenTo",
            Keyword::Lg2 => "lg2",
            Keyword::Max => "max",
            Keyword::Min => "min",
            Keyword::Mod => "mod",
            Keyword::Not => "not",
            Keyword::True => "True",
            Keyword::Width => "width",
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, ()> {
        all::<Keyword>().find(|k| k.as_str() == s).ok_or(())
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let lo = offset;
        let kind = match bytes[offset] {
            b if b.is_ascii_whitespace() => {
                offset += 1;
                continue;
            }
            b'(' => {
                offset += 1;
                TokenKind::Open
            }
            b')' => {
                offset += 1;
                TokenKind::Close
            }
            b'+' => {
                offset += 1;
                TokenKind::Plus
            }
            b'-' => {
                offset += 1;
                TokenKind::Minus
            }
            b'*' => {
                offset += 1;
                TokenKind::Star
            }
            b'^' if bytes.get(lo + 1) == Some(&b'^') => {
                offset += 2;
                TokenKind::CaretCaret
            }
            b'&' if bytes.get(lo + 1) == Some(&b'&') => {
                offset += 2;
                TokenKind::AmpAmp
            }
            b'|' if bytes.get(lo + 1) == Some(&b'|') => {
                offset += 2;
                TokenKind::BarBar
            }
            b'=' if bytes.get(lo + 1) == Some(&b'=') => {
                offset += 2;
                TokenKind::EqEq
            }
            b'>' if bytes.get(lo + 1) == Some(&b'=') => {
                offset += 2;
                TokenKind::Gte
            }
            b'>' => {
                offset += 1;
                TokenKind::Gt
            }
            b':' if input[lo..].starts_with(":==:") => {
                offset += 4;
                TokenKind::ColonEq
            }
            b':' if input[lo..].starts_with(":>:") => {
                offset += 3;
                TokenKind::ColonGt
            }
            b if b.is_ascii_digit() => {
                while offset < bytes.len() && bytes[offset].is_ascii_digit() {
                    offset += 1;
                }
                TokenKind::Number
            }
            b if b.is_ascii_alphabetic() => {
                while offset < bytes.len() && bytes[offset].is_ascii_alphanumeric() {
                    offset += 1;
                }
                TokenKind::Ident
            }
            _ => {
                let c = input[lo..].chars().next().expect("offset is in bounds");
                let span = Span {
                    lo,
                    hi: lo + c.len_utf8(),
                };
                return Err(Error(ErrorKind::Char(c, span)));
            }
        };
        tokens.push(Token {
            kind,
            span: Span { lo, hi: offset },
        });
    }
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            lo: input.len(),
            hi: input.len(),
        },
    });
    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self> {
        Ok(Self {
            input,
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    fn read(&self) -> &'a str {
        let span = self.peek().span;
        &self.input[span.lo..span.hi]
    }

    fn keyword(&self) -> Option<Keyword> {
        if self.peek().kind == TokenKind::Ident {
            self.read().parse().ok()
        } else {
            None
        }
    }

    fn advance(&mut self) {
        if self.peek().kind != TokenKind::Eof {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        let peek = self.peek();
        if peek.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(Error(ErrorKind::Token(kind, peek.kind, peek.span)))
        }
    }

    fn mark(&self) -> usize {
        self.pos
    }

    fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }
}

fn prop(p: &mut Parser) -> Result<Prop> {
    let lhs = and_prop(p)?;
    if p.peek().kind == TokenKind::BarBar {
        p.advance();
        let rhs = prop(p)?;
        Ok(Prop::or(lhs, rhs))
    } else {
        Ok(lhs)
    }
}

fn and_prop(p: &mut Parser) -> Result<Prop> {
    let lhs = cmp_prop(p)?;
    if p.peek().kind == TokenKind::AmpAmp {
        p.advance();
        let rhs = and_prop(p)?;
        Ok(Prop::and(lhs, rhs))
    } else {
        Ok(lhs)
    }
}

fn cmp_prop(p: &mut Parser) -> Result<Prop> {
    match p.keyword() {
        Some(Keyword::True) => {
            p.advance();
            return Ok(Prop::True);
        }
        Some(Keyword::False) => {
            p.advance();
            return Ok(Prop::False);
        }
        Some(Keyword::Not) => {
            p.advance();
            return Ok(Prop::not(atom_prop(p)?));
        }
        Some(Keyword::Fin) => {
            p.advance();
            return Ok(Prop::Fin(atom_expr(p)?));
        }
        _ => {}
    }
    if p.peek().kind == TokenKind::Open {
        let mark = p.mark();
        p.advance();
        if let Ok(group) = prop(p) {
            if p.expect(TokenKind::Close).is_ok() {
                return Ok(group);
            }
        }
        p.reset(mark);
    }
    cmp_from_expr(p)
}

fn cmp_from_expr(p: &mut Parser) -> Result<Prop> {
    let lhs = expr(p)?;
    let peek = p.peek();
    let op = match peek.kind {
        TokenKind::EqEq => Prop::Eq,
        TokenKind::Gte => Prop::Geq,
        TokenKind::Gt => Prop::Gt,
        TokenKind::ColonEq => Prop::EqNat,
        TokenKind::ColonGt => Prop::GtNat,
        kind => return Err(Error(ErrorKind::Rule("comparison", kind, peek.span))),
    };
    p.advance();
    let rhs = expr(p)?;
    Ok(op(lhs, rhs))
}

fn atom_prop(p: &mut Parser) -> Result<Prop> {
    match p.keyword() {
        Some(Keyword::True) => {
            p.advance();
            return Ok(Prop::True);
        }
        Some(Keyword::False) => {
            p.advance();
            return Ok(Prop::False);
        }
        Some(Keyword::Not) => {
            p.advance();
            return Ok(Prop::not(atom_prop(p)?));
        }
        Some(Keyword::Fin) => {
            p.advance();
            return Ok(Prop::Fin(atom_expr(p)?));
        }
        _ => {}
    }
    let peek = p.peek();
    if peek.kind == TokenKind::Open {
        p.advance();
        let group = prop(p)?;
        p.expect(TokenKind::Close)?;
        Ok(group)
    } else {
        Err(Error(ErrorKind::Rule("proposition", peek.kind, peek.span)))
    }
}

fn expr(p: &mut Parser) -> Result<Expr> {
    let mut lhs = mul_expr(p)?;
    loop {
        let op = match p.peek().kind {
            TokenKind::Plus => Expr::add,
            TokenKind::Minus => Expr::sub,
            _ => return Ok(lhs),
        };
        p.advance();
        let rhs = mul_expr(p)?;
        lhs = op(lhs, rhs);
    }
}

fn mul_expr(p: &mut Parser) -> Result<Expr> {
    let mut lhs = exp_expr(p)?;
    loop {
        let op = match (p.peek().kind, p.keyword()) {
            (TokenKind::Star, _) => Expr::mul,
            (_, Some(Keyword::Div)) => Expr::div,
            (_, Some(Keyword::Mod)) => Expr::rem,
            _ => return Ok(lhs),
        };
        p.advance();
        let rhs = exp_expr(p)?;
        lhs = op(lhs, rhs);
    }
}

fn exp_expr(p: &mut Parser) -> Result<Expr> {
    let lhs = app_expr(p)?;
    if p.peek().kind == TokenKind::CaretCaret {
        p.advance();
        let rhs = exp_expr(p)?;
        Ok(Expr::exp(lhs, rhs))
    } else {
        Ok(lhs)
    }
}

fn app_expr(p: &mut Parser) -> Result<Expr> {
    match p.keyword() {
        Some(Keyword::Lg2) => {
            p.advance();
            Ok(Expr::lg2(atom_expr(p)?))
        }
        Some(Keyword::Width) => {
            p.advance();
            Ok(Expr::width(atom_expr(p)?))
        }
        Some(Keyword::Min) => {
            p.advance();
            Ok(Expr::min(atom_expr(p)?, atom_expr(p)?))
        }
        Some(Keyword::Max) => {
            p.advance();
            Ok(Expr::max(atom_expr(p)?, atom_expr(p)?))
        }
        Some(Keyword::LenFromThen) => {
            p.advance();
            Ok(Expr::len_from_then(
                atom_expr(p)?,
                atom_expr(p)?,
                atom_expr(p)?,
            ))
        }
        Some(Keyword::LenFromThenTo) => {
            p.advance();
            Ok(Expr::len_from_then_to(
                atom_expr(p)?,
                atom_expr(p)?,
                atom_expr(p)?,
            ))
        }
        _ => atom_expr(p),
    }
}

fn atom_expr(p: &mut Parser) -> Result<Expr> {
    let peek = p.peek();
    match peek.kind {
        TokenKind::Number => {
            let value = p
                .read()
                .parse::<BigUint>()
                .map_err(|_| Error(ErrorKind::Lit(peek.span)))?;
            p.advance();
            Ok(Expr::K(InfNat::from(value)))
        }
        TokenKind::Ident => {
            if p.keyword() == Some(Keyword::Inf) {
                p.advance();
                return Ok(Expr::inf());
            }
            let name = var_of(p.read()).ok_or(Error(ErrorKind::Var(peek.span)))?;
            p.advance();
            Ok(Expr::Var(name))
        }
        TokenKind::Open => {
            p.advance();
            let group = expr(p)?;
            p.expect(TokenKind::Close)?;
            Ok(group)
        }
        kind => Err(Error(ErrorKind::Rule("expression", kind, peek.span))),
    }
}

/// The inverse of the canonical name stream: a lowercase letter with an
/// optional index that does not start with zero.
fn var_of(text: &str) -> Option<Name> {
    let first = *text.as_bytes().first()?;
    if !first.is_ascii_lowercase() {
        return None;
    }
    let letter = u32::from(first - b'a');
    let index = &text[1..];
    if index.is_empty() {
        return Some(Name::new(letter));
    }
    if index.starts_with('0') {
        return None;
    }
    let index: u32 = index.parse().ok()?;
    Some(Name::new(letter + 26 * index))
}
