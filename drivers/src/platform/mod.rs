//! SoC Abstraction Layer
//!
//! This module provides the chip-agnostic GPIO driver and the per-chip
//! descriptions it is parameterized by. Each supported chip family
//! implements the [`Soc`] trait with its constants and register tables;
//! [`SocDriver`] implements the whole [`GpioDriver`] operation set once on
//! top of that.
//!
//! # Usage
//!
//! ```no_run
//! use drivers::hal::gpio::{GpioDriver, PinLevel, PinMode};
//! use drivers::platform::{sophgo::Cv180, SocDriver};
//! use drivers::DriverConfig;
//!
//! static MAP: [i32; 3] = [-1, 0, 1];
//!
//! let mut soc = SocDriver::<Cv180>::new(DriverConfig::default());
//! soc.setup()?;
//! soc.set_map(&MAP);
//! soc.pin_mode(1, PinMode::Output)?;
//! soc.digital_write(1, PinLevel::High)?;
//! soc.gc()?;
//! # Ok::<(), drivers::GpioError>(())
//! ```
//!
//! [`GpioDriver`]: crate::hal::gpio::GpioDriver

use std::path::PathBuf;

use crate::config::DriverConfig;
use crate::hal::gpio::IsrModes;
use crate::hw::layout::{PinDescriptor, Region};

mod driver;

pub use driver::SocDriver;

/// SoC trait - implemented by each supported chip family
pub trait Soc {
    /// Vendor name for diagnostics.
    const BRAND: &'static str;

    /// Chip name for diagnostics.
    const CHIP: &'static str;

    /// Edge modes the chip's kernel driver accepts.
    const ISR_MODES: IsrModes;

    /// Width in bits of a pad multiplexer field.
    const MUX_WIDTH: u32;

    /// One region per GPIO bank, indexed by [`PinDescriptor::bank`].
    fn gpio_regions() -> &'static [Region];

    /// Pad-control regions, indexed by the multiplexer's `window`.
    fn pad_regions() -> &'static [Region];

    /// Pin layout table.
    fn layout() -> &'static [PinDescriptor];

    /// Sysfs directory holding the `direction`, `edge` and `value`
    /// attributes of an exported pin.
    fn line_dir(config: &DriverConfig, pin: &PinDescriptor) -> PathBuf {
        config.class_line_dir(pin.line)
    }
}

// Chip selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(any(feature = "cv180", feature = "th1520"))] {
        #[cfg(feature = "cv180")]
        pub mod sophgo;
        #[cfg(feature = "th1520")]
        pub mod thead;
    } else {
        compile_error!(
            "No chip family selected!\n\
            Use: cargo build --features cv180\n\
            Or:  cargo build --features th1520"
        );
    }
}
