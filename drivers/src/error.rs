//! GPIO driver errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::hal::gpio::{Edge, PinMode};

/// Coarse classification of a [`GpioError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The memory device or a register window is unavailable.
    Setup,
    /// The logical pin does not resolve to a usable SoC pin, or its
    /// descriptor points outside the mapped register windows.
    InvalidPin,
    /// The pin's recorded mode does not allow the operation.
    ModeMismatch,
    /// A sysfs export, direction, edge or value step failed.
    KernelInterface,
    /// A mode, level or edge argument was rejected.
    InvalidArgument,
}

/// Errors that can occur when operating on GPIO pins.
#[derive(Debug, Error)]
pub enum GpioError {
    #[error("failed to open {} for raw memory access", path.display())]
    MemDevice {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to map the {chip} {region} memory address {base:#x}")]
    Map {
        chip: &'static str,
        region: &'static str,
        base: u64,
        #[source]
        source: io::Error,
    },

    #[error("the {0} has already been set up")]
    AlreadySetup(&'static str),

    #[error("the {0} has not yet been set up")]
    NotSetup(&'static str),

    #[error("the {0} has not yet been mapped")]
    NotMapped(&'static str),

    #[error("{pin} is not a valid GPIO number")]
    InvalidPin { pin: usize },

    #[error("GPIO{pin} is not set to {expected:?} mode (currently {actual:?})")]
    ModeMismatch {
        pin: usize,
        expected: PinMode,
        actual: PinMode,
    },

    #[error("invalid pin mode {mode:?} for GPIO{pin}")]
    InvalidMode { pin: usize, mode: PinMode },

    #[error("invalid value {0} for a GPIO level")]
    InvalidValue(i32),

    #[error("the {chip} does not support {edge:?} interrupts")]
    UnsupportedEdge { chip: &'static str, edge: Edge },

    #[error("register access at offset {offset:#x} failed")]
    Register {
        offset: usize,
        #[source]
        source: io::Error,
    },

    #[error("sysfs operation on {} failed", path.display())]
    Sysfs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GpioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GpioError::MemDevice { .. }
            | GpioError::Map { .. }
            | GpioError::AlreadySetup(_)
            | GpioError::NotSetup(_) => ErrorKind::Setup,
            GpioError::NotMapped(_)
            | GpioError::InvalidPin { .. }
            | GpioError::Register { .. } => ErrorKind::InvalidPin,
            GpioError::ModeMismatch { .. } => ErrorKind::ModeMismatch,
            GpioError::InvalidMode { .. }
            | GpioError::InvalidValue(_)
            | GpioError::UnsupportedEdge { .. } => ErrorKind::InvalidArgument,
            GpioError::Sysfs { .. } => ErrorKind::KernelInterface,
        }
    }
}

pub type Result<T> = core::result::Result<T, GpioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_faults_are_pin_errors() {
        let err = GpioError::Register {
            offset: 0x1000,
            source: io::Error::new(io::ErrorKind::InvalidInput, "outside the window"),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidPin);
        assert_eq!(err.to_string(), "register access at offset 0x1000 failed");
    }

    #[test]
    fn setup_failures() {
        assert_eq!(GpioError::NotSetup("CV180").kind(), ErrorKind::Setup);
        assert_eq!(GpioError::AlreadySetup("CV180").kind(), ErrorKind::Setup);
        assert_eq!(GpioError::NotMapped("CV180").kind(), ErrorKind::InvalidPin);
    }
}
