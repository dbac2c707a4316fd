// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Domain errors reported by fallible math operations.
///
/// Degenerate-but-recoverable inputs (normalising a zero vector, a zero-norm
/// quaternion) are not errors; they resolve to the zero vector or identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// A scalar divisor was exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The quaternion has zero norm and therefore no inverse.
    #[error("zero-norm quaternion has no inverse")]
    ZeroNormQuaternion,
    /// Gauss-Jordan elimination found no usable pivot.
    #[error("matrix is singular: zero pivot in column {column}")]
    SingularMatrix {
        /// Pivot column at which elimination stopped.
        column: usize,
    },
    /// A reduction was asked to fold an empty slice.
    #[error("cannot reduce an empty slice")]
    EmptyInput,
    /// A packed buffer does not divide evenly into elements.
    #[error("buffer length {len} is not a multiple of {stride}")]
    BufferLength {
        /// Number of scalars supplied.
        len: usize,
        /// Scalars per element.
        stride: usize,
    },
    /// A sampling range had `min > max`.
    #[error("invalid range: min is greater than max")]
    InvalidRange,
}

/// Result alias for fallible math operations.
pub type Result<T> = core::result::Result<T, MathError>;
