//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! This module defines the chip-independent GPIO programming model: pin
//! levels, pin modes, interrupt edges and the [`GpioDriver`] operation set
//! implemented by SoC drivers and forwarded by board drivers.

use std::os::fd::RawFd;

use crate::error::GpioError;

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0V or ground).
    Low = 0,
    /// Logic high (VDD).
    High = 1,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

impl TryFrom<i32> for PinLevel {
    type Error = GpioError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PinLevel::Low),
            1 => Ok(PinLevel::High),
            other => {
                log::error!("invalid value {other} for a GPIO level");
                Err(GpioError::InvalidValue(other))
            }
        }
    }
}

/// Recorded mode of a pin.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PinMode {
    /// Never configured since setup.
    #[default]
    NotSet,
    /// Configured as a digital input.
    Input,
    /// Configured as a digital output.
    Output,
    /// Exported to the kernel for edge-triggered interrupts.
    Interrupt,
}

/// Edge sensitivity of an interrupt pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    /// Low-to-high transition.
    Rising,
    /// High-to-low transition.
    Falling,
    /// Either transition.
    Both,
    /// No transition triggers an event.
    None,
}

impl Edge {
    /// Token accepted by the sysfs `edge` attribute.
    pub const fn token(self) -> &'static str {
        match self {
            Edge::Rising => "rising",
            Edge::Falling => "falling",
            Edge::Both => "both",
            Edge::None => "none",
        }
    }

    /// The capability flag matching this edge.
    pub const fn flag(self) -> IsrModes {
        match self {
            Edge::Rising => IsrModes::RISING,
            Edge::Falling => IsrModes::FALLING,
            Edge::Both => IsrModes::BOTH,
            Edge::None => IsrModes::NONE,
        }
    }
}

bitflags::bitflags! {
    /// Edge modes a chip can deliver through sysfs.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct IsrModes: u8 {
        const RISING = 1 << 0;
        const FALLING = 1 << 1;
        const BOTH = 1 << 2;
        const NONE = 1 << 3;
    }
}

/// Result of waiting on an interrupt pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptStatus {
    /// The configured edge occurred.
    Triggered,
    /// The timeout elapsed first, or a signal interrupted the wait.
    Timeout,
}

/// GPIO driver trait.
///
/// Pins are addressed by their logical (connector) index. Every operation
/// first translates that index through the installed pin map or interrupt
/// map; an unmapped index is an error and touches no hardware.
///
/// # Concurrency
///
/// Implementations do no locking. Register updates are read-modify-write
/// sequences on registers shared by a whole bank, so callers must not drive
/// pins of the same bank from several threads at once.
pub trait GpioDriver {
    /// Error type for GPIO operations.
    type Error: core::fmt::Debug;

    /// Open the memory device and map every register window.
    fn setup(&mut self) -> Result<(), Self::Error>;

    /// Install the connector-to-layout pin map.
    fn set_map(&mut self, map: &'static [i32]);

    /// Install the connector-to-layout map used for interrupt pins.
    fn set_irq(&mut self, irq: &'static [i32]);

    /// Name of the SoC pin behind a logical pin.
    fn pin_name(&self, pin: usize) -> Result<&'static str, Self::Error>;

    /// Select GPIO function and set the direction of a pin.
    ///
    /// Only [`PinMode::Input`] and [`PinMode::Output`] are accepted; use
    /// [`GpioDriver::isr`] for interrupts.
    fn pin_mode(&mut self, pin: usize, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive an output pin.
    fn digital_write(&mut self, pin: usize, level: PinLevel) -> Result<(), Self::Error>;

    /// Sample an input pin.
    fn digital_read(&self, pin: usize) -> Result<PinLevel, Self::Error>;

    /// Export a pin to the kernel and arm edge detection on it.
    fn isr(&mut self, pin: usize, edge: Edge) -> Result<(), Self::Error>;

    /// Block until an interrupt pin fires or `timeout_ms` elapses.
    ///
    /// `0` polls once, a negative timeout waits forever.
    fn wait_for_interrupt(&self, pin: usize, timeout_ms: i32)
    -> Result<InterruptStatus, Self::Error>;

    /// Raw descriptor of an interrupt pin, for use in an external poll loop.
    ///
    /// The descriptor stays owned by the driver and is closed by
    /// [`GpioDriver::gc`].
    fn selectable_fd(&self, pin: usize) -> Result<RawFd, Self::Error>;

    /// Release every pin and register window.
    fn gc(&mut self) -> Result<(), Self::Error>;

    /// Set the pin to logic high.
    fn set_high(&mut self, pin: usize) -> Result<(), Self::Error> {
        self.digital_write(pin, PinLevel::High)
    }

    /// Set the pin to logic low.
    fn set_low(&mut self, pin: usize) -> Result<(), Self::Error> {
        self.digital_write(pin, PinLevel::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_from_integers() {
        assert_eq!(PinLevel::try_from(0).unwrap(), PinLevel::Low);
        assert_eq!(PinLevel::try_from(1).unwrap(), PinLevel::High);
        assert!(matches!(
            PinLevel::try_from(2),
            Err(GpioError::InvalidValue(2))
        ));
        assert!(PinLevel::try_from(-1).is_err());
    }

    #[test]
    fn levels_and_bools() {
        assert_eq!(PinLevel::from(true), PinLevel::High);
        assert!(!bool::from(PinLevel::Low));
    }

    #[test]
    fn edge_tokens_and_flags() {
        assert_eq!(Edge::Rising.token(), "rising");
        assert_eq!(Edge::Falling.token(), "falling");
        assert_eq!(Edge::Both.token(), "both");
        assert_eq!(Edge::None.token(), "none");

        let only_rising = IsrModes::RISING;
        assert!(only_rising.contains(Edge::Rising.flag()));
        assert!(!only_rising.contains(Edge::Both.flag()));
    }
}
