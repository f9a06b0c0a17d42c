//! Error types for array construction, view and compute operations

use thiserror::Error;

/// Errors that can occur during array operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// The shape contains a negative or otherwise malformed extent
    #[error("Invalid shape [{code}]: {message}\nShape: {shape}\nOperation: {operation}\nSuggestion: {suggestion}")]
    InvalidShape {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// String representation of the rejected shape
        shape: String,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Element counts disagree (reshape, value population, dot operands)
    #[error("Size mismatch [{code}]: {message}\nExpected: {expected} elements\nActual: {actual} elements\nOperation: {operation}\nSuggestion: {suggestion}")]
    SizeMismatch {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Number of elements the operation required
        expected: usize,
        /// Number of elements that were supplied
        actual: usize,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Arrays have shapes that cannot be broadcast or multiplied together
    #[error("Shape compatibility error [{code}]: {message}\nOperation: {operation}\nLeft shape: {left_shape}\nRight shape: {right_shape}\nSuggestion: {suggestion}")]
    IncompatibleShapes {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// The operation that failed
        operation: String,
        /// String representation of the left array shape
        left_shape: String,
        /// String representation of the right array shape
        right_shape: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Transpose axes are not a permutation of `0..ndim`
    #[error("Invalid permutation [{code}]: {message}\nAxes: {axes}\nRank: {ndim}\nSuggestion: {suggestion}")]
    InvalidPermutation {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// String representation of the rejected axes
        axes: String,
        /// Rank of the array being transposed
        ndim: usize,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// An axis argument lies outside the valid range
    #[error("Axis out of range [{code}]: {message}\nAxis: {axis}, Rank: {ndim}\nOperation: {operation}\nSuggestion: {suggestion}")]
    AxisOutOfRange {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// The axis as supplied by the caller
        axis: i64,
        /// Rank of the array
        ndim: usize,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Squeeze was asked to drop an axis whose extent is not 1
    #[error("Cannot squeeze [{code}]: {message}\nAxis: {axis}, Extent: {extent}\nSuggestion: {suggestion}")]
    CannotSqueeze {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// The axis that was asked to be removed
        axis: usize,
        /// Its actual extent
        extent: usize,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Operand rank is wrong for the operation
    #[error("Rank mismatch [{code}]: {message}\nExpected: {expected}\nActual: {actual}\nOperation: {operation}\nSuggestion: {suggestion}")]
    RankMismatch {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Description of the accepted ranks
        expected: String,
        /// The rank that was supplied
        actual: usize,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// Arithmetic sequence parameters cannot produce a finite sequence
    #[error("Invalid range [{code}]: {message}\nStart: {start}, Stop: {stop}, Step: {step}\nSuggestion: {suggestion}")]
    InvalidRange {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Sequence start
        start: f32,
        /// Sequence stop (exclusive)
        stop: f32,
        /// Sequence step
        step: f32,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// The element buffer could not be allocated
    #[error("Allocation failure [{code}]: {message}\nRequested: {requested} elements\nSuggestion: {suggestion}")]
    AllocationFailure {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// Number of elements requested (saturated on overflow)
        requested: usize,
        /// Suggested fix for the error
        suggestion: String,
    },

    /// The operation needs a contiguous buffer but got a strided view
    #[error("Non-contiguous array [{code}]: {message}\nShape: {shape}\nStrides: {strides}\nOperation: {operation}\nSuggestion: {suggestion}")]
    NonContiguous {
        /// Error code for programmatic handling
        code: &'static str,
        /// Human-readable error message
        message: String,
        /// String representation of the array shape
        shape: String,
        /// String representation of the array strides
        strides: String,
        /// The operation that failed
        operation: String,
        /// Suggested fix for the error
        suggestion: String,
    },
}

/// Convenient result type for array operations
pub type Result<T> = std::result::Result<T, ArrayError>;

/// Discriminant of [`ArrayError`] without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ArrayError::InvalidShape`]
    InvalidShape,
    /// See [`ArrayError::SizeMismatch`]
    SizeMismatch,
    /// See [`ArrayError::IncompatibleShapes`]
    IncompatibleShapes,
    /// See [`ArrayError::InvalidPermutation`]
    InvalidPermutation,
    /// See [`ArrayError::AxisOutOfRange`]
    AxisOutOfRange,
    /// See [`ArrayError::CannotSqueeze`]
    CannotSqueeze,
    /// See [`ArrayError::RankMismatch`]
    RankMismatch,
    /// See [`ArrayError::InvalidRange`]
    InvalidRange,
    /// See [`ArrayError::AllocationFailure`]
    AllocationFailure,
    /// See [`ArrayError::NonContiguous`]
    NonContiguous,
}

impl ArrayError {
    /// Create an invalid shape error
    pub fn invalid_shape<S1, S2, S3, S4>(
        code: &'static str,
        message: S1,
        shape: S2,
        operation: S3,
        suggestion: S4,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self::InvalidShape {
            code,
            message: message.into(),
            shape: shape.into(),
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a size mismatch error
    pub fn size_mismatch<S1, S2, S3>(
        code: &'static str,
        message: S1,
        expected: usize,
        actual: usize,
        operation: S2,
        suggestion: S3,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::SizeMismatch {
            code,
            message: message.into(),
            expected,
            actual,
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an incompatible shapes error
    pub fn incompatible_shapes<S1, S2, S3, S4, S5>(
        code: &'static str,
        message: S1,
        operation: S2,
        left_shape: S3,
        right_shape: S4,
        suggestion: S5,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
        S5: Into<String>,
    {
        Self::IncompatibleShapes {
            code,
            message: message.into(),
            operation: operation.into(),
            left_shape: left_shape.into(),
            right_shape: right_shape.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an invalid permutation error
    pub fn invalid_permutation<S1, S2, S3>(
        code: &'static str,
        message: S1,
        axes: S2,
        ndim: usize,
        suggestion: S3,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidPermutation {
            code,
            message: message.into(),
            axes: axes.into(),
            ndim,
            suggestion: suggestion.into(),
        }
    }

    /// Create an axis out of range error
    pub fn axis_out_of_range<S1, S2, S3>(
        code: &'static str,
        message: S1,
        axis: i64,
        ndim: usize,
        operation: S2,
        suggestion: S3,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::AxisOutOfRange {
            code,
            message: message.into(),
            axis,
            ndim,
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a cannot-squeeze error
    pub fn cannot_squeeze<S1, S2>(
        code: &'static str,
        message: S1,
        axis: usize,
        extent: usize,
        suggestion: S2,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::CannotSqueeze {
            code,
            message: message.into(),
            axis,
            extent,
            suggestion: suggestion.into(),
        }
    }

    /// Create a rank mismatch error
    pub fn rank_mismatch<S1, S2, S3, S4>(
        code: &'static str,
        message: S1,
        expected: S2,
        actual: usize,
        operation: S3,
        suggestion: S4,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self::RankMismatch {
            code,
            message: message.into(),
            expected: expected.into(),
            actual,
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an invalid range error
    pub fn invalid_range<S1, S2>(
        code: &'static str,
        message: S1,
        start: f32,
        stop: f32,
        step: f32,
        suggestion: S2,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::InvalidRange {
            code,
            message: message.into(),
            start,
            stop,
            step,
            suggestion: suggestion.into(),
        }
    }

    /// Create an allocation failure error
    pub fn allocation_failure<S1, S2>(
        code: &'static str,
        message: S1,
        requested: usize,
        suggestion: S2,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::AllocationFailure {
            code,
            message: message.into(),
            requested,
            suggestion: suggestion.into(),
        }
    }

    /// Create a non-contiguous error
    pub fn non_contiguous<S1, S2, S3, S4, S5>(
        code: &'static str,
        message: S1,
        shape: S2,
        strides: S3,
        operation: S4,
        suggestion: S5,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
        S5: Into<String>,
    {
        Self::NonContiguous {
            code,
            message: message.into(),
            shape: shape.into(),
            strides: strides.into(),
            operation: operation.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Get the error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidShape { code, .. } => code,
            Self::SizeMismatch { code, .. } => code,
            Self::IncompatibleShapes { code, .. } => code,
            Self::InvalidPermutation { code, .. } => code,
            Self::AxisOutOfRange { code, .. } => code,
            Self::CannotSqueeze { code, .. } => code,
            Self::RankMismatch { code, .. } => code,
            Self::InvalidRange { code, .. } => code,
            Self::AllocationFailure { code, .. } => code,
            Self::NonContiguous { code, .. } => code,
        }
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidShape { .. } => ErrorKind::InvalidShape,
            Self::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::IncompatibleShapes { .. } => ErrorKind::IncompatibleShapes,
            Self::InvalidPermutation { .. } => ErrorKind::InvalidPermutation,
            Self::AxisOutOfRange { .. } => ErrorKind::AxisOutOfRange,
            Self::CannotSqueeze { .. } => ErrorKind::CannotSqueeze,
            Self::RankMismatch { .. } => ErrorKind::RankMismatch,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            Self::NonContiguous { .. } => ErrorKind::NonContiguous,
        }
    }

    /// Check if this is a shape-related error
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. }
                | Self::SizeMismatch { .. }
                | Self::IncompatibleShapes { .. }
                | Self::RankMismatch { .. }
        )
    }
}
