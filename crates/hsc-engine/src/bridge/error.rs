use std::fmt;

use crate::native::{NativeOp, SurfaceId};

/// Windowing-layer event an error was raised for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceEvent {
    Available,
    Resized,
    Lost,
}

impl fmt::Display for SurfaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SurfaceEvent::Available => "available",
            SurfaceEvent::Resized => "resized",
            SurfaceEvent::Lost => "lost",
        })
    }
}

/// Why an event was not permitted in the current state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Violation {
    /// "available" for a surface that still has a bound control.
    AlreadyBound,
    /// "resized" or "lost" for a surface with no bound control.
    NotBound,
    /// "resized" with a non-positive dimension.
    EmptyGeometry { width: i32, height: i32 },
}

/// Error returned synchronously to the windowing layer.
#[derive(Debug)]
pub enum BridgeError {
    /// The event is illegal for the surface's current state. Nothing changed.
    ProtocolViolation {
        surface: SurfaceId,
        event: SurfaceEvent,
        violation: Violation,
    },

    /// The native layer rejected a call. Not retried.
    NativeResourceFailure {
        surface: SurfaceId,
        op: NativeOp,
        source: anyhow::Error,
    },
}

impl BridgeError {
    pub(crate) fn violation(surface: SurfaceId, event: SurfaceEvent, violation: Violation) -> Self {
        Self::ProtocolViolation { surface, event, violation }
    }

    pub(crate) fn native(surface: SurfaceId, op: NativeOp, source: anyhow::Error) -> Self {
        Self::NativeResourceFailure { surface, op, source }
    }

    /// Surface the error refers to.
    pub fn surface(&self) -> SurfaceId {
        match self {
            Self::ProtocolViolation { surface, .. } | Self::NativeResourceFailure { surface, .. } => {
                *surface
            }
        }
    }

    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::ProtocolViolation { .. })
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProtocolViolation { surface, event, violation } => {
                write!(f, "protocol violation on {surface}: '{event}' ")?;
                match violation {
                    Violation::AlreadyBound => f.write_str("while a surface control is still bound"),
                    Violation::NotBound => f.write_str("without a bound surface control"),
                    Violation::EmptyGeometry { width, height } => {
                        write!(f, "with empty geometry {width}x{height}")
                    }
                }
            }
            Self::NativeResourceFailure { surface, op, .. } => {
                write!(f, "native surface control {op} failed for {surface}")
            }
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ProtocolViolation { .. } => None,
            Self::NativeResourceFailure { source, .. } => Some(&**source),
        }
    }
}

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
