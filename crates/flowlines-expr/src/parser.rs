//! Recursive-descent parser producing validated [`Expr`] trees.
//!
//! Precedence, lowest first:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-') unary | power
//! power := atom ('**' unary)?          right-associative, -x**2 == -(x**2)
//! atom  := number | name | name '(' args ')' | '(' expr ')'
//! ```

use smallvec::SmallVec;

use crate::ast::{lookup_constant, Axis, BinOp, Builtin, Expr};
use crate::error::SyntaxError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Module prefixes accepted in front of function and constant names.
const MODULE_PREFIXES: [&str; 5] = ["np", "numpy", "math", "sympy", "sp"];

/// Deepest formula accepted. Each enclosing parenthesis, call, prefix sign
/// and exponent counts one level, as does each operator joining two
/// subexpressions.
pub const MAX_DEPTH: usize = 256;

pub(crate) fn parse(src: &str) -> Result<Expr, SyntaxError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(SyntaxError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let node = parser.expr()?;
    match parser.peek() {
        None => Ok(node.expr),
        Some(Token {
            kind: TokenKind::RParen,
            offset,
        }) => Err(SyntaxError::UnmatchedParen { offset: *offset }),
        Some(tok) => Err(unexpected(tok)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current recursion depth.
    depth: usize,
}

/// A parsed subexpression and the height of its tree.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    /// Wrap `expr` built from children of at most `children` height.
    /// Folded constants count as leaves.
    fn build(expr: Expr, children: usize, offset: usize) -> Result<Node, SyntaxError> {
        let height = match expr {
            Expr::Const(_) | Expr::Var(_) => 1,
            _ => children + 1,
        };
        if height > MAX_DEPTH {
            return Err(SyntaxError::TooDeep { offset });
        }
        Ok(Node { expr, height })
    }

    fn leaf(expr: Expr) -> Node {
        Node { expr, height: 1 }
    }
}

fn unexpected(tok: &Token) -> SyntaxError {
    SyntaxError::UnexpectedToken {
        found: tok.kind.describe(),
        offset: tok.offset,
    }
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_offset(&self) -> usize {
        self.peek().map_or(0, |t| t.offset)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Run `f` one level deeper, failing at [`MAX_DEPTH`].
    fn nested<T>(
        &mut self,
        offset: usize,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep { offset });
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn expr(&mut self) -> Result<Node, SyntaxError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            let offset = self.peek_offset();
            self.pos += 1;
            let rhs = self.term()?;
            let children = lhs.height.max(rhs.height);
            lhs = Node::build(Expr::binary(op, lhs.expr, rhs.expr), children, offset)?;
        }
    }

    fn term(&mut self) -> Result<Node, SyntaxError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            let offset = self.peek_offset();
            self.pos += 1;
            let rhs = self.unary()?;
            let children = lhs.height.max(rhs.height);
            lhs = Node::build(Expr::binary(op, lhs.expr, rhs.expr), children, offset)?;
        }
    }

    fn unary(&mut self) -> Result<Node, SyntaxError> {
        let offset = self.peek_offset();
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                let inner = self.nested(offset, Self::unary)?;
                Node::build(Expr::neg(inner.expr), inner.height, offset)
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.nested(offset, Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Node, SyntaxError> {
        let base = self.atom()?;
        if let Some(TokenKind::Pow) = self.peek_kind() {
            let offset = self.peek_offset();
            self.pos += 1;
            let exponent = self.nested(offset, Self::unary)?;
            let children = base.height.max(exponent.height);
            return Node::build(
                Expr::binary(BinOp::Pow, base.expr, exponent.expr),
                children,
                offset,
            );
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Node, SyntaxError> {
        let Token { kind, offset } = self.next().ok_or(SyntaxError::UnexpectedEnd)?;
        match kind {
            TokenKind::Number(n) => Ok(Node::leaf(Expr::Const(n))),
            TokenKind::LParen => {
                let inner = self.nested(offset, Self::expr)?;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    None => Err(SyntaxError::UnmatchedParen { offset }),
                    Some(other) => Err(unexpected(&other)),
                }
            }
            TokenKind::Ident(name) => {
                if let Some(TokenKind::LParen) = self.peek_kind() {
                    self.call(&name, offset)
                } else {
                    resolve_symbol(&name, offset).map(Node::leaf)
                }
            }
            other => Err(SyntaxError::UnexpectedToken {
                found: other.describe(),
                offset,
            }),
        }
    }

    fn call(&mut self, name: &str, offset: usize) -> Result<Node, SyntaxError> {
        let builtin = strip_module(name)
            .and_then(Builtin::lookup)
            .ok_or_else(|| SyntaxError::UnknownFunction {
                name: name.to_string(),
                offset,
            })?;

        let open = self.next().map(|t| t.offset).unwrap_or(offset);
        let mut args: SmallVec<[Node; 2]> = SmallVec::new();
        if let Some(TokenKind::RParen) = self.peek_kind() {
            self.pos += 1;
        } else {
            loop {
                args.push(self.nested(open, Self::expr)?);
                match self.next() {
                    Some(Token {
                        kind: TokenKind::Comma,
                        ..
                    }) => continue,
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => break,
                    None => return Err(SyntaxError::UnmatchedParen { offset: open }),
                    Some(other) => return Err(unexpected(&other)),
                }
            }
        }

        if args.len() != builtin.arity() {
            return Err(SyntaxError::WrongArity {
                name: name.to_string(),
                expected: builtin.arity(),
                found: args.len(),
                offset,
            });
        }

        let mut args = args.into_iter();
        match (builtin, args.next(), args.next()) {
            (Builtin::Unary(f), Some(a), None) => {
                Node::build(Expr::unary(f, a.expr), a.height, offset)
            }
            (Builtin::Binary(op), Some(a), Some(b)) => {
                let children = a.height.max(b.height);
                Node::build(Expr::binary(op, a.expr, b.expr), children, offset)
            }
            _ => Err(SyntaxError::UnexpectedEnd),
        }
    }
}

/// Strip an accepted module prefix. Returns `None` for unknown prefixes.
fn strip_module(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        None => Some(name),
        Some((prefix, bare)) if MODULE_PREFIXES.contains(&prefix) => Some(bare),
        Some(_) => None,
    }
}

fn resolve_symbol(name: &str, offset: usize) -> Result<Expr, SyntaxError> {
    let undefined = || SyntaxError::UndefinedSymbol {
        name: name.to_string(),
        offset,
    };
    match name {
        "x" => return Ok(Expr::Var(Axis::X)),
        "y" => return Ok(Expr::Var(Axis::Y)),
        _ => {}
    }
    let bare = strip_module(name).ok_or_else(undefined)?;
    lookup_constant(bare).map(Expr::Const).ok_or_else(undefined)
}
