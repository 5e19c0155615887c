//! Error types.

use std::time::Duration;

use snafu::Snafu;

use crate::motion::Action;

/// Errors that end a motion early.
///
/// Whatever the cause, the motion has already stopped every motor by the
/// time one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MotionError {
    /// The motion did not reach its target in time.
    #[snafu(display("{action} did not finish within {timeout:?}"))]
    Timeout {
        /// The action that was running.
        action:  Action,
        /// The timeout that elapsed.
        timeout: Duration,
    },
}
