//! Validated expression trees.
//!
//! An [`Expr`] only ever refers to the coordinates `x`/`y`, numeric
//! constants and the builtins below; the parser rejects anything else.
//! The smart constructors fold constant subexpressions.

use std::f64::consts;
use std::fmt;

/// A planar coordinate symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// `x`
    X,
    /// `y`
    Y,
}

/// One-argument builtin functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryFn {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Sign: −1, 0 or 1.
    Sign,
    /// Round toward −∞.
    Floor,
    /// Round toward +∞.
    Ceil,
}

impl UnaryFn {
    /// Apply to a single value.
    pub fn apply(self, a: f64) -> f64 {
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Exp => a.exp(),
            Self::Ln => a.ln(),
            Self::Sqrt => a.sqrt(),
            Self::Abs => a.abs(),
            // `f64::signum` maps 0 to 1; sign(0) is 0.
            Self::Sign => {
                if a > 0.0 {
                    1.0
                } else if a < 0.0 {
                    -1.0
                } else {
                    a
                }
            }
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
            Self::Floor => "floor",
            Self::Ceil => "ceiling",
        }
    }
}

/// Two-argument operations: arithmetic operators and binary builtins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a ** b`
    Pow,
    /// `atan2(a, b)`
    Atan2,
    /// `Min(a, b)`, NaN-propagating.
    Min,
    /// `Max(a, b)`, NaN-propagating.
    Max,
}

impl BinOp {
    /// Apply to a pair of values.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.powf(b),
            Self::Atan2 => a.atan2(b),
            Self::Min => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.min(b)
                }
            }
            Self::Max => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.max(b)
                }
            }
        }
    }

    fn infix(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Sub => Some("-"),
            Self::Mul => Some("*"),
            Self::Div => Some("/"),
            Self::Pow => Some("**"),
            Self::Atan2 | Self::Min | Self::Max => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Atan2 => "atan2",
            Self::Min => "Min",
            Self::Max => "Max",
            _ => self.infix().unwrap_or("?"),
        }
    }
}

/// A builtin resolved from a function name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Builtin {
    Unary(UnaryFn),
    Binary(BinOp),
}

impl Builtin {
    pub(crate) fn arity(self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }

    /// Resolve a bare (prefix-stripped) function name.
    pub(crate) fn lookup(name: &str) -> Option<Builtin> {
        use Builtin::{Binary, Unary};
        let b = match name {
            "sin" => Unary(UnaryFn::Sin),
            "cos" => Unary(UnaryFn::Cos),
            "tan" => Unary(UnaryFn::Tan),
            "asin" | "arcsin" => Unary(UnaryFn::Asin),
            "acos" | "arccos" => Unary(UnaryFn::Acos),
            "atan" | "arctan" => Unary(UnaryFn::Atan),
            "sinh" => Unary(UnaryFn::Sinh),
            "cosh" => Unary(UnaryFn::Cosh),
            "tanh" => Unary(UnaryFn::Tanh),
            "exp" => Unary(UnaryFn::Exp),
            "log" | "ln" => Unary(UnaryFn::Ln),
            "sqrt" => Unary(UnaryFn::Sqrt),
            "abs" | "Abs" | "fabs" => Unary(UnaryFn::Abs),
            "sign" => Unary(UnaryFn::Sign),
            "floor" => Unary(UnaryFn::Floor),
            "ceiling" | "ceil" => Unary(UnaryFn::Ceil),
            "atan2" | "arctan2" => Binary(BinOp::Atan2),
            "min" | "Min" | "minimum" => Binary(BinOp::Min),
            "max" | "Max" | "maximum" => Binary(BinOp::Max),
            "pow" | "power" => Binary(BinOp::Pow),
            _ => return None,
        };
        Some(b)
    }
}

/// Resolve a bare constant name.
pub(crate) fn lookup_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(consts::PI),
        "E" => Some(consts::E),
        _ => None,
    }
}

/// A validated expression over `x` and `y`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A numeric constant.
    Const(f64),
    /// A coordinate.
    Var(Axis),
    /// Negation.
    Neg(Box<Expr>),
    /// A one-argument builtin.
    Unary(UnaryFn, Box<Expr>),
    /// An operator or two-argument builtin.
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Negate, folding constants.
    pub fn neg(a: Expr) -> Expr {
        match a {
            Expr::Const(c) => Expr::Const(-c),
            a => Expr::Neg(Box::new(a)),
        }
    }

    /// Apply a unary builtin, folding constants.
    pub fn unary(f: UnaryFn, a: Expr) -> Expr {
        match a {
            Expr::Const(c) => Expr::Const(f.apply(c)),
            a => Expr::Unary(f, Box::new(a)),
        }
    }

    /// Apply a binary operation, folding constants.
    pub fn binary(op: BinOp, a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Const(l), Expr::Const(r)) => Expr::Const(op.apply(l, r)),
            (a, b) => Expr::Binary(op, Box::new(a), Box::new(b)),
        }
    }

    /// Returns `true` if the expression folded to a single constant.
    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    /// Returns `true` if `axis` occurs anywhere in the expression.
    pub fn uses(&self, axis: Axis) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Var(a) => *a == axis,
            Expr::Neg(a) | Expr::Unary(_, a) => a.uses(axis),
            Expr::Binary(_, a, b) => a.uses(axis) || b.uses(axis),
        }
    }

    /// Tree-walking evaluation at a point.
    ///
    /// The reference semantics for [`Tape`](crate::Tape); compiled
    /// programs must agree with it exactly.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            Expr::Const(c) => *c,
            Expr::Var(Axis::X) => x,
            Expr::Var(Axis::Y) => y,
            Expr::Neg(a) => -a.eval(x, y),
            Expr::Unary(f, a) => f.apply(a.eval(x, y)),
            Expr::Binary(op, a, b) => op.apply(a.eval(x, y), b.eval(x, y)),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Var(Axis::X) => write!(f, "x"),
            Expr::Var(Axis::Y) => write!(f, "y"),
            Expr::Neg(a) => write!(f, "-({a})"),
            Expr::Unary(func, a) => write!(f, "{}({a})", func.name()),
            Expr::Binary(op, a, b) => match op.infix() {
                Some(sym) => write!(f, "({a} {sym} {b})"),
                None => write!(f, "{}({a}, {b})", op.name()),
            },
        }
    }
}
