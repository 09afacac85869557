//! GPIO Driver Subsystem
//!
//! This crate provides a layered architecture for user-space GPIO access on
//! single-board computers:
//!
//! # Module Organization
//!
//! - [`hal`]: Chip-independent GPIO types and the [`GpioDriver`] trait
//! - [`hw`]: Per-chip register addresses and pin layout tables
//! - [`platform`]: The generic SoC driver and the chip families it supports
//! - [`board`]: Board adapters carrying connector pin maps
//!
//! # Design Principles
//!
//! 1. **Data, not code, per chip**: one driver walks every chip's tables
//! 2. **Owned instances**: each driver owns its windows and descriptors
//! 3. **Clean teardown**: `gc()` leaves no output energized and no line exported
//!
//! # Usage Example
//!
//! ```no_run
//! use drivers::board::milkv;
//! use drivers::{DriverConfig, Edge, GpioDriver, InterruptStatus};
//!
//! let mut duo = milkv::duo(DriverConfig::default());
//! duo.setup()?;
//! duo.isr(2, Edge::Falling)?;
//! if duo.wait_for_interrupt(2, 1000)? == InterruptStatus::Triggered {
//!     println!("{} fired", duo.pin_name(2)?);
//! }
//! duo.gc()?;
//! # Ok::<(), drivers::GpioError>(())
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod hal;
pub mod hw;
pub mod platform;

// Re-export commonly used types
pub use board::Board;
pub use config::DriverConfig;
pub use error::{ErrorKind, GpioError};
pub use hal::gpio::{Edge, GpioDriver, InterruptStatus, IsrModes, PinLevel, PinMode};
pub use platform::{Soc, SocDriver};
