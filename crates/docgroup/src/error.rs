use crate::position::Position;
use markup::ParseError;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlgebraError {
    /// A character outside the active symbol domain.
    UnknownSymbol { symbol: char, domain: &'static str },
    /// A position that does not address a node, e.g. one not starting at 1.
    InvalidPosition(Position),
    /// An inserted node did not land at the position it was inserted for.
    StructuralInconsistency { expected: Position, actual: Position },
    /// One operand of a string sum was the empty string.
    EmptyOperand,
    /// Event-stream input could not be parsed.
    Parse(ParseError),
    /// The output sink of a streaming sum failed.
    Write,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { symbol, domain } => {
                write!(f, "symbol {symbol:?} is not in the {domain} domain")
            }
            Self::InvalidPosition(position) => write!(f, "invalid position {position}"),
            Self::StructuralInconsistency { expected, actual } => write!(
                f,
                "structural inconsistency: node inserted for {expected} landed at {actual}"
            ),
            Self::EmptyOperand => f.write_str("empty string is not a group element"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Write => f.write_str("failed to write output"),
        }
    }
}

impl std::error::Error for AlgebraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for AlgebraError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<fmt::Error> for AlgebraError {
    fn from(_: fmt::Error) -> Self {
        Self::Write
    }
}

pub type Result<T, E = AlgebraError> = std::result::Result<T, E>;
