// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for shape construction and mutation.

use thiserror::Error;

/// Errors raised by shape constructors and shape mutation.
///
/// Construction errors are fatal for the value being built; callers must not
/// proceed with a clamped or guessed shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeomError {
    /// A segment was requested with endpoints closer than `EPS`.
    #[error("line endpoints coincide")]
    DegenerateLine,
    /// Rectangle corners are inverted (bottom-left above or right of top-right).
    #[error("rectangle corners are inverted")]
    InvalidRectangle,
    /// A circle was requested with a negative radius.
    #[error("circle radius must be non-negative")]
    NegativeRadius,
    /// A coordinate or scalar was NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    /// The operation is not defined for this shape variant.
    #[error("operation `{op}` not supported for {shape}")]
    Unsupported {
        /// Operation name.
        op: &'static str,
        /// Shape variant name.
        shape: &'static str,
    },
    /// A vertex index outside the shape's vertex list.
    #[error("vertex index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of vertices.
        len: usize,
    },
}
