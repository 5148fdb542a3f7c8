// Error taxonomy for the isogeny arithmetic core.
//
// The hot path (point doubling/tripling, ladders, isogeny evaluation) is
// infallible by construction: every input is a caller-guaranteed-valid
// field element or point, and the formulas involved have no data-dependent
// failure mode. The only place a genuine, recoverable failure can arise is
// taking a square root in GF(p^2) of a non-residue (`sqrt_Fp2`), reached
// from `CompletePoint`/`CompleteMPoint`. Everything else named
// "PreconditionViolation" in the design is, per spec, left as undefined
// output rather than turned into a checked error, since adding checks on
// a secret-dependent path would itself be a timing leak.

use core::fmt;

/// Errors surfaced at the boundary of the core arithmetic layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// The field backend's square root failed because the radicand is a
    /// non-residue in GF(p^2). Corresponds to the `FieldError` case in
    /// the design's error taxonomy.
    NonResidue,
    /// A byte slice handed to a `from_bytes` constructor had the wrong
    /// length. Not part of the arithmetic core proper; only the
    /// boundary-facing decode helpers can return this.
    InvalidEncodingLength { expected: usize, found: usize },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CoreError::NonResidue => {
                write!(f, "square root of a non-residue in GF(p^2)")
            }
            CoreError::InvalidEncodingLength { expected, found } => {
                write!(
                    f,
                    "invalid encoding length: expected {} bytes, found {}",
                    expected, found
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;
