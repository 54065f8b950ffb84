use thiserror::Error;

/// Top-level error type for the floorgraph kernel.
#[derive(Debug, Error)]
pub enum FloorgraphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
///
/// Miter and area code never produce these; they are reserved for inputs
/// that can be rejected up front.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Structural violations of the wall graph. Nothing is mutated when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("wall point is still referenced by {edges} edge(s)")]
    PointInUse { edges: usize },

    #[error("edge endpoints must be distinct wall points")]
    SelfLoop,

    #[error("edge is not a wall")]
    NotAWall,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Non-structural failures of plan operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("selected points do not form a closed loop")]
    NoValidLoop,

    #[error("no wall within reach of the wall part")]
    NoEligibleAnchor,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`FloorgraphError`].
pub type Result<T> = std::result::Result<T, FloorgraphError>;

impl FloorgraphError {
    /// Returns `true` if this error is [`OperationError::NoValidLoop`].
    #[must_use]
    pub fn is_no_valid_loop(&self) -> bool {
        matches!(self, Self::Operation(OperationError::NoValidLoop))
    }

    /// Returns `true` if this error is a structural violation of the graph.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Topology(_))
    }
}
