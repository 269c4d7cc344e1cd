use thiserror::Error;

/// Crate-wide error type.
///
/// Configuration errors (shapes, registration, offsets, unknown names) are
/// fatal and detected eagerly; evaluation errors abort the in-progress step
/// before any field mutation commits.
#[derive(Debug, Error)]
pub enum Error {
    #[error("field `{0}` is already registered")]
    DuplicateField(String),
    #[error("no field named `{0}`")]
    UnknownField(String),
    #[error("fields are already allocated; register() must precede create()")]
    AlreadyAllocated,
    #[error("create() called with no registered fields")]
    NothingRegistered,
    #[error("stencil offset ({di}, {dj}) exceeds ghost width {ng}")]
    StencilOffsetOutOfRange { di: isize, dj: isize, ng: usize },
    #[error("array shape {got:?} does not match padded grid shape {want:?}")]
    ShapeMismatch {
        got: (usize, usize),
        want: (usize, usize),
    },
    #[error("rhs returned {got} derivative arrays for {want} fields")]
    DerivativeCountMismatch { got: usize, want: usize },
    #[error("non-finite flux for field `{0}`")]
    NonFiniteFlux(String),
    #[error("stage {stage} failed: {source}")]
    StageFailed {
        stage: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("unknown boundary condition `{0}`")]
    UnknownBoundary(String),
    #[error("unknown problem `{0}`")]
    UnknownProblem(String),
    #[error("unknown time scheme `{0}`")]
    UnknownScheme(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse parameter file: {0}")]
    ParamParse(#[from] serde_json::Error),
    #[error("failed to write csv output: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
