use winnow::error::{ContextError, ParseError, StrContext};

use crate::ast::CmpOp;

/// Error produced while compiling rule text. All variants are user errors
/// reported against the offending rule; none abort compilation of other rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("parse error at offset {position}: expected {expected}, found {found}")]
    Parse {
        /// Byte offset into the rule text where parsing stopped.
        position: usize,
        expected: String,
        found: String,
    },
    #[error("unknown field {name:?}")]
    UnknownField { name: String },
    #[error("operator {op} cannot be applied to field {field:?}: {reason}")]
    TypeMismatch {
        field: &'static str,
        op: CmpOp,
        reason: String,
    },
    #[error("invalid regex pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl CompileError {
    /// Convert a winnow parse failure into [`CompileError::Parse`]. Context
    /// accumulates outward from the failure site, so the first expectation is
    /// the most specific one. A failure with no context at all is the
    /// end-of-input check tripping over trailing text.
    pub(crate) fn from_parse(err: &ParseError<&str, ContextError>, text: &str) -> Self {
        let position = err.offset();

        let expected = err
            .inner()
            .context()
            .find_map(|c| match c {
                StrContext::Expected(value) => Some(value.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| "end of input".to_string());

        let found = match text[position..].split_whitespace().next() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };

        CompileError::Parse {
            position,
            expected,
            found,
        }
    }
}
