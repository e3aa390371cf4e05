// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

/// Errors that can occur while validating sources, reading scenarios, or writing results.
#[derive(Debug)]
pub enum DislocError {
    /// Lamé parameters give `lambda + mu == 0`.
    InvalidMedium {
        /// Position of the offending source in the input.
        index: usize,
        /// First Lamé parameter.
        lambda: f64,
        /// Shear modulus.
        mu: f64,
    },
    /// Source depth is negative (above the free surface).
    InvalidDepth {
        /// Position of the offending source in the input.
        index: usize,
        /// The depth provided.
        depth: f64,
    },
    /// Point source placed on the free surface.
    SurfacePointSource {
        /// Position of the offending source in the input.
        index: usize,
    },
    /// Fault length or width is negative.
    InvalidDimensions {
        /// Position of the offending source in the input.
        index: usize,
        /// Length along strike.
        length: f64,
        /// Width along dip.
        width: f64,
    },
    /// Finite fault extends above the free surface (`depth < width * sin(dip)`).
    FaultAboveSurface {
        /// Position of the offending source in the input.
        index: usize,
        /// Depth of the reference corner.
        depth: f64,
        /// Vertical extent of the fault, `width * sin(dip)`.
        extent: f64,
    },
    /// A source parameter is NaN or infinite.
    NonFiniteParameter {
        /// Position of the offending source in the input.
        index: usize,
        /// Name of the parameter.
        name: &'static str,
        /// The value provided.
        value: f64,
    },
    /// Source type code is neither 0 (point source) nor 1 (finite fault).
    UnknownSourceKind(i64),
    /// Observation grid has an empty axis.
    InvalidGridShape {
        /// The axis index (0 = x, 1 = y).
        axis: usize,
        /// The number of nodes provided.
        size: usize,
    },
    /// Observation grid has more nodes than can be addressed.
    GridTooLarge {
        /// Node counts (nx, ny).
        counts: [usize; 2],
    },
    /// Observation grid spacing is not finite.
    InvalidGridSpacing(f64),
    /// Observation point has a non-finite coordinate.
    InvalidObservation {
        /// Position of the point in the observation list.
        index: usize,
        /// The coordinates provided.
        point: [f64; 2],
    },
    /// Malformed input text.
    Parse {
        /// 1-based line number where the problem was found.
        line: usize,
        /// What went wrong.
        reason: String,
    },
    /// Unsupported file format (unrecognized extension).
    UnsupportedFileFormat(String),
    /// I/O error occurred.
    IoError(std::io::Error),
    /// Other error with a descriptive message.
    Other(String),
}

impl fmt::Display for DislocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DislocError::InvalidMedium { index, lambda, mu } => {
                write!(
                    f,
                    "invalid medium for source {}: lambda={} mu={} (lambda + mu must be non-zero)",
                    index, lambda, mu
                )
            }
            DislocError::InvalidDepth { index, depth } => {
                write!(
                    f,
                    "invalid depth for source {}: {} (must be non-negative)",
                    index, depth
                )
            }
            DislocError::SurfacePointSource { index } => {
                write!(
                    f,
                    "point source {} lies on the free surface (depth must be positive)",
                    index
                )
            }
            DislocError::InvalidDimensions {
                index,
                length,
                width,
            } => {
                write!(
                    f,
                    "invalid dimensions for source {}: length={} width={} (must be non-negative)",
                    index, length, width
                )
            }
            DislocError::FaultAboveSurface {
                index,
                depth,
                extent,
            } => {
                write!(
                    f,
                    "finite fault {} extends above the free surface: depth={} vertical extent={} (depth must be >= width * sin(dip))",
                    index, depth, extent
                )
            }
            DislocError::NonFiniteParameter { index, name, value } => {
                write!(
                    f,
                    "invalid {} for source {}: {} (must be finite)",
                    name, index, value
                )
            }
            DislocError::UnknownSourceKind(code) => {
                write!(
                    f,
                    "unknown source type code: {} (expected 0 for point source or 1 for finite fault)",
                    code
                )
            }
            DislocError::InvalidGridShape { axis, size } => {
                write!(
                    f,
                    "invalid grid shape: axis {} has size {} (must be >= 1)",
                    axis, size
                )
            }
            DislocError::GridTooLarge { counts } => {
                write!(
                    f,
                    "invalid grid shape: {} x {} nodes is too many points",
                    counts[0], counts[1]
                )
            }
            DislocError::InvalidGridSpacing(h) => {
                write!(f, "invalid grid spacing: {} (must be finite)", h)
            }
            DislocError::InvalidObservation { index, point } => {
                write!(
                    f,
                    "invalid observation point {}: {:?} (coordinates must be finite)",
                    index, point
                )
            }
            DislocError::Parse { line, reason } => {
                write!(f, "parse error at line {}: {}", line, reason)
            }
            DislocError::UnsupportedFileFormat(ext) => {
                write!(f, "unsupported file format: {}", ext)
            }
            DislocError::IoError(e) => write!(f, "I/O error: {}", e),
            DislocError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DislocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DislocError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DislocError {
    fn from(e: std::io::Error) -> Self {
        DislocError::IoError(e)
    }
}

/// Convenience type alias for Results with DislocError.
pub type Result<T> = std::result::Result<T, DislocError>;
