//! Formula compilation errors.
//!
//! [`SyntaxError`] describes what went wrong inside one formula;
//! [`ParseError`] adds which component it was and the offending text.

use std::error::Error;
use std::fmt;

/// Which velocity component a formula defines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// The x-component, `u(x, y)`.
    U,
    /// The y-component, `v(x, y)`.
    V,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U => write!(f, "u"),
            Self::V => write!(f, "v"),
        }
    }
}

/// A failure inside a single formula. Offsets are byte offsets into the
/// formula text.
#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxError {
    /// The formula is empty or whitespace.
    Empty,
    /// A character that starts no token.
    UnexpectedChar {
        /// The character.
        ch: char,
        /// Where it appeared.
        offset: usize,
    },
    /// A malformed numeric literal.
    InvalidNumber {
        /// The literal text.
        text: String,
        /// Where it started.
        offset: usize,
    },
    /// A token that cannot appear at this position.
    UnexpectedToken {
        /// Rendering of the token.
        found: String,
        /// Where it appeared.
        offset: usize,
    },
    /// The formula ended where an operand was required.
    UnexpectedEnd,
    /// A parenthesis with no partner.
    UnmatchedParen {
        /// Where the unpaired parenthesis is.
        offset: usize,
    },
    /// An identifier that is neither a coordinate nor a known constant.
    UndefinedSymbol {
        /// The identifier.
        name: String,
        /// Where it appeared.
        offset: usize,
    },
    /// A call to a function the engine does not provide.
    UnknownFunction {
        /// The function name.
        name: String,
        /// Where it appeared.
        offset: usize,
    },
    /// A known function called with the wrong number of arguments.
    WrongArity {
        /// The function name.
        name: String,
        /// Arguments it takes.
        expected: usize,
        /// Arguments it was given.
        found: usize,
        /// Where the call started.
        offset: usize,
    },
    /// Parentheses, prefix signs, exponents or operator chains nested past
    /// [`MAX_DEPTH`](crate::MAX_DEPTH).
    TooDeep {
        /// The token that crossed the limit.
        offset: usize,
    },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty formula"),
            Self::UnexpectedChar { ch, offset } => {
                write!(f, "unexpected character '{ch}' at {offset}")
            }
            Self::InvalidNumber { text, offset } => {
                write!(f, "invalid number '{text}' at {offset}")
            }
            Self::UnexpectedToken { found, offset } => {
                write!(f, "unexpected {found} at {offset}")
            }
            Self::UnexpectedEnd => write!(f, "unexpected end of formula"),
            Self::UnmatchedParen { offset } => write!(f, "unmatched parenthesis at {offset}"),
            Self::UndefinedSymbol { name, offset } => {
                write!(f, "undefined symbol '{name}' at {offset} (use x and y)")
            }
            Self::UnknownFunction { name, offset } => {
                write!(f, "unknown function '{name}' at {offset}")
            }
            Self::WrongArity {
                name,
                expected,
                found,
                offset,
            } => write!(
                f,
                "'{name}' at {offset} takes {expected} argument(s), got {found}"
            ),
            Self::TooDeep { offset } => write!(
                f,
                "formula nested deeper than {} levels at {offset}",
                crate::MAX_DEPTH
            ),
        }
    }
}

impl Error for SyntaxError {}

/// A formula failed to parse or validate. No field is produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// Which component's formula failed.
    pub component: Component,
    /// The formula text as given.
    pub source_text: String,
    /// What went wrong.
    pub cause: SyntaxError,
}

impl ParseError {
    /// Attach component and text to a [`SyntaxError`].
    pub fn new(component: Component, source_text: impl Into<String>, cause: SyntaxError) -> Self {
        Self {
            component,
            source_text: source_text.into(),
            cause,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse {}(x,y) = {:?}: {}",
            self.component, self.source_text, self.cause
        )
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_chains_its_cause() {
        let err = ParseError::new(Component::V, "(x", SyntaxError::UnmatchedParen { offset: 0 });
        assert_eq!(
            err.to_string(),
            "could not parse v(x,y) = \"(x\": unmatched parenthesis at 0"
        );
        let source = err.source().expect("cause");
        assert_eq!(source.to_string(), "unmatched parenthesis at 0");
    }

    #[test]
    fn arity_message() {
        let e = SyntaxError::WrongArity {
            name: "atan2".into(),
            expected: 2,
            found: 1,
            offset: 3,
        };
        assert_eq!(e.to_string(), "'atan2' at 3 takes 2 argument(s), got 1");
    }

    #[test]
    fn depth_message_names_the_limit() {
        let e = SyntaxError::TooDeep { offset: 256 };
        assert_eq!(e.to_string(), "formula nested deeper than 256 levels at 256");
    }
}
