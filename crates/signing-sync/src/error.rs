//! Error types for signing-sync

use signing_core::Identity;

use crate::surface::StepDirection;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Drag surface rejected {primitive}: {reason}")]
    SurfaceRejected { primitive: String, reason: String },

    #[error("Cannot step {identity} {direction} from position {position}")]
    StepOutOfBounds {
        identity: Identity,
        direction: StepDirection,
        position: usize,
    },

    #[error("Replay plan mismatch: {message}")]
    PlanMismatch { message: String },

    #[error("Replay task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_out_of_bounds_display() {
        let err = Error::StepOutOfBounds {
            identity: Identity::new("signer-1"),
            direction: StepDirection::Up,
            position: 0,
        };
        assert!(err.to_string().contains("signer-1"));
        assert!(err.to_string().contains("up"));
    }
}
