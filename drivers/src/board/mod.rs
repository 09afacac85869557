//! Board drivers
//!
//! A board knows which SoC it carries and how its connector pins map onto
//! that SoC's layout table. Everything else is forwarded to the
//! [`SocDriver`].

use std::os::fd::RawFd;

use log::info;

use crate::config::DriverConfig;
use crate::error::{GpioError, Result};
use crate::hal::gpio::{Edge, GpioDriver, InterruptStatus, PinLevel, PinMode};
use crate::hw::layout::UNMAPPED;
use crate::platform::{Soc, SocDriver};

pub mod milkv;

/// A single-board computer built around the chip `C`.
pub struct Board<C: Soc> {
    name: &'static str,
    map: &'static [i32],
    irq: &'static [i32],
    soc: SocDriver<C>,
}

impl<C: Soc> Board<C> {
    pub fn new(
        name: &'static str,
        map: &'static [i32],
        irq: &'static [i32],
        config: DriverConfig,
    ) -> Self {
        let mut soc = SocDriver::new(config);
        soc.set_map(map);
        soc.set_irq(irq);

        Self {
            name,
            map,
            irq,
            soc,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of connector pins.
    pub fn pin_count(&self) -> usize {
        self.map.len()
    }

    /// Whether connector pin `pin` is wired to a GPIO.
    pub fn valid_gpio(&self, pin: usize) -> bool {
        self.map.get(pin).is_some_and(|&index| index != UNMAPPED)
    }

    pub fn soc(&self) -> &SocDriver<C> {
        &self.soc
    }
}

impl<C: Soc> GpioDriver for Board<C> {
    type Error = GpioError;

    fn setup(&mut self) -> Result<()> {
        self.soc.setup()?;
        info!("{} ready ({} {})", self.name, C::BRAND, C::CHIP);
        Ok(())
    }

    fn set_map(&mut self, map: &'static [i32]) {
        self.map = map;
        self.soc.set_map(map);
    }

    fn set_irq(&mut self, irq: &'static [i32]) {
        self.irq = irq;
        self.soc.set_irq(irq);
    }

    fn pin_name(&self, pin: usize) -> Result<&'static str> {
        self.soc.pin_name(pin)
    }

    fn pin_mode(&mut self, pin: usize, mode: PinMode) -> Result<()> {
        self.soc.pin_mode(pin, mode)
    }

    fn digital_write(&mut self, pin: usize, level: PinLevel) -> Result<()> {
        self.soc.digital_write(pin, level)
    }

    fn digital_read(&self, pin: usize) -> Result<PinLevel> {
        self.soc.digital_read(pin)
    }

    fn isr(&mut self, pin: usize, edge: Edge) -> Result<()> {
        self.soc.isr(pin, edge)
    }

    fn wait_for_interrupt(&self, pin: usize, timeout_ms: i32) -> Result<InterruptStatus> {
        self.soc.wait_for_interrupt(pin, timeout_ms)
    }

    fn selectable_fd(&self, pin: usize) -> Result<RawFd> {
        self.soc.selectable_fd(pin)
    }

    fn gc(&mut self) -> Result<()> {
        self.soc.gc()
    }
}
