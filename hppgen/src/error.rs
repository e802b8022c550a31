//! Error taxonomy for the generation core.
//!
//! Every variant is fatal: the pipeline stops and nothing is written.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No mapping rule accepts the raw type spelling.
    #[error("unsupported raw type `{ty}` for `{context}`")]
    UnsupportedType { ty: String, context: String },

    /// A `count_for` relation that cannot be resolved unambiguously.
    #[error("invalid count relation in `{owner}`: {reason}")]
    InvalidCountRelation { owner: String, reason: String },

    /// Two constants of one enum group collapse to the same enumerator.
    #[error("enum `{group}`: `{first}` and `{second}` both map to enumerator `{enumerator}`")]
    DuplicateEnumerator {
        group: String,
        enumerator: String,
        first: String,
        second: String,
    },

    /// A derived identifier ended up empty after prefix stripping.
    #[error("`{raw}` produces an empty {what} name")]
    EmptyName { raw: String, what: &'static str },

    #[error("line {line}: unknown template command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: generated region is never closed")]
    UnterminatedRegion { line: usize },

    #[error("line {line}: end marker without an open generated region")]
    UnexpectedEnd { line: usize },

    #[error("line {line}: begin marker inside an open generated region (opened on line {opened})")]
    NestedRegion { line: usize, opened: usize },
}
