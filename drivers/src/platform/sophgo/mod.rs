//! Sophgo SoC support

use std::path::PathBuf;

use super::Soc;
use crate::config::DriverConfig;
use crate::hal::gpio::IsrModes;
use crate::hw::cv180;
use crate::hw::layout::{PinDescriptor, Region};

/// Sophgo CV180 (Milk-V Duo).
#[derive(Debug, Copy, Clone)]
pub struct Cv180;

impl Soc for Cv180 {
    const BRAND: &'static str = "Sophgo";
    const CHIP: &'static str = "CV180";
    const ISR_MODES: IsrModes = IsrModes::all();
    const MUX_WIDTH: u32 = cv180::PINMUX_WIDTH;

    fn gpio_regions() -> &'static [Region] {
        &cv180::GPIO_REGIONS
    }

    fn pad_regions() -> &'static [Region] {
        &cv180::PAD_REGIONS
    }

    fn layout() -> &'static [PinDescriptor] {
        &cv180::LAYOUT
    }

    /// The attributes of an exported line live under the platform device of
    /// the controller that owns it, not under `class/gpio`.
    fn line_dir(config: &DriverConfig, pin: &PinDescriptor) -> PathBuf {
        match cv180::GPIO_BASES.get(pin.bank) {
            Some(base) => config
                .sysfs_root
                .join("devices/platform")
                .join(format!("{base:x}.gpio"))
                .join(format!("gpiochip{}", pin.bank))
                .join("gpio")
                .join(format!("gpio{}", pin.line)),
            None => config.class_line_dir(pin.line),
        }
    }
}
