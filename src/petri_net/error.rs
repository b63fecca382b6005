//! The engine's error taxonomy. Only two conditions are ever returned from
//! a `Result`; everything else (negative weights, an empty transition set,
//! marking overflow) is a programmer error and panics instead.

use thiserror::Error;

/// Failure modes of a blocking `fire` call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PetriNetError {
    /// The wait was interrupted cooperatively before any transition became
    /// enabled. The marking is unchanged.
    #[error("fire was cancelled before any transition became enabled")]
    Cancelled,
    /// `fire_timeout`'s deadline elapsed before any transition became
    /// enabled. The marking is unchanged.
    #[error("fire timed out before any transition became enabled")]
    TimedOut,
}
