mod ast;
mod compile;
mod error;
pub mod fields;
pub mod parse_utils;
mod parser;

pub use ast::CmpOp;
pub use compile::{
    CompiledCond, CompiledExpr, CondTest, FUZZY_MATCH_THRESHOLD, NumOp, SubstrMode, compile,
};
pub use error::CompileError;
pub use fields::{Field, FieldKind};
