//! Chip-agnostic SoC GPIO driver.
//!
//! Every operation follows the same shape: validate the logical pin against
//! the installed map, locate its descriptor in the chip's layout table, then
//! do a bit read-modify-write in the bank's register window or walk the
//! sysfs export protocol. Only the data differs between chips.

use std::fs::File;
use std::io;
use std::marker::PhantomData;
use std::os::fd::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use common::mmio::{MemDevice, RegisterWindow};
use common::sysfs::{self, Wake};
use log::{debug, error, info, warn};

use super::Soc;
use crate::config::DriverConfig;
use crate::error::{GpioError, Result};
use crate::hal::gpio::{Edge, GpioDriver, InterruptStatus, PinLevel, PinMode};
use crate::hw::layout::{PinDescriptor, Region, UNMAPPED};

/// Runtime state of one layout entry.
#[derive(Debug, Default)]
enum PinState {
    #[default]
    NotSet,
    Input,
    Output,
    /// Exported for edge detection; holds the open `value` file.
    Interrupt(File),
}

impl PinState {
    fn mode(&self) -> PinMode {
        match self {
            PinState::NotSet => PinMode::NotSet,
            PinState::Input => PinMode::Input,
            PinState::Output => PinMode::Output,
            PinState::Interrupt(_) => PinMode::Interrupt,
        }
    }
}

/// Resources held between `setup()` and `gc()`.
struct Mapped {
    gpio: Vec<RegisterWindow>,
    pads: Vec<RegisterWindow>,
    mem: MemDevice,
}

#[derive(Debug, Copy, Clone)]
enum MapKind {
    Pins,
    Irq,
}

/// GPIO driver for one chip family.
///
/// The driver exclusively owns its register windows and interrupt
/// descriptors. Dropping it runs [`GpioDriver::gc`].
pub struct SocDriver<C: Soc> {
    config: DriverConfig,
    mapped: Option<Mapped>,
    pins: Vec<PinState>,
    map: Option<&'static [i32]>,
    irq: Option<&'static [i32]>,
    _chip: PhantomData<C>,
}

impl<C: Soc> SocDriver<C> {
    /// Create an unconfigured driver. Nothing is opened until `setup()`.
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            mapped: None,
            pins: std::iter::repeat_with(PinState::default)
                .take(C::layout().len())
                .collect(),
            map: None,
            irq: None,
            _chip: PhantomData,
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Whether the register windows are currently mapped.
    pub fn is_setup(&self) -> bool {
        self.mapped.is_some()
    }

    /// Location of the memory device currently open, if any.
    pub fn mem_device(&self) -> Option<&Path> {
        self.mapped.as_ref().map(|mapped| mapped.mem.path())
    }

    /// Recorded mode of a logical pin.
    pub fn mode(&self, pin: usize) -> Result<PinMode> {
        let index = self.locate(pin, MapKind::Pins)?;
        Ok(self.pins[index].mode())
    }

    /// Layout entry behind a logical pin.
    pub fn descriptor(&self, pin: usize) -> Result<&'static PinDescriptor> {
        let index = self.locate(pin, MapKind::Pins)?;
        Ok(&C::layout()[index])
    }

    /// Translate a logical pin to its layout index.
    fn locate(&self, pin: usize, kind: MapKind) -> Result<usize> {
        let map = match kind {
            MapKind::Pins => self.map,
            MapKind::Irq => self.irq,
        }
        .ok_or_else(|| {
            error!("The {} {} has not yet been mapped", C::BRAND, C::CHIP);
            GpioError::NotMapped(C::CHIP)
        })?;

        let index = map
            .get(pin)
            .copied()
            .filter(|&value| value != UNMAPPED)
            .and_then(|value| usize::try_from(value).ok())
            .ok_or_else(|| invalid_pin(pin))?;

        let desc = C::layout()
            .get(index)
            .filter(|desc| desc.available)
            .ok_or_else(|| invalid_pin(pin))?;

        if desc.bank >= C::gpio_regions().len() {
            error!(
                "{} bank out of range: {}, expect 0~{}",
                desc.name,
                desc.bank,
                C::gpio_regions().len().saturating_sub(1)
            );
            return Err(invalid_pin(pin));
        }
        if desc.multiplex.window >= C::pad_regions().len() {
            error!(
                "{} pad group out of range: {}",
                desc.name, desc.multiplex.window
            );
            return Err(invalid_pin(pin));
        }

        Ok(index)
    }

    fn mapped(&self) -> Result<&Mapped> {
        self.mapped.as_ref().ok_or_else(|| {
            error!(
                "The {} {} has not yet been setup",
                C::BRAND,
                C::CHIP
            );
            GpioError::NotSetup(C::CHIP)
        })
    }

    fn expect_mode(&self, pin: usize, index: usize, expected: PinMode) -> Result<()> {
        let actual = self.pins[index].mode();
        if actual != expected {
            return Err(mode_mismatch::<C>(pin, expected, actual));
        }
        Ok(())
    }

    fn interrupt_value(&self, pin: usize, index: usize) -> Result<&File> {
        match &self.pins[index] {
            PinState::Interrupt(value) => Ok(value),
            other => Err(mode_mismatch::<C>(pin, PinMode::Interrupt, other.mode())),
        }
    }

    /// Route a pad to GPIO and set its direction bit.
    fn configure(mapped: &Mapped, desc: &PinDescriptor, mode: PinMode) -> Result<()> {
        let mux = &desc.multiplex;
        window(&mapped.pads, mux.window)?
            .write_bits(mux.offset, mux.bit, C::MUX_WIDTH, mux.value)
            .map_err(|source| register_failure(desc, mux.offset, source))?;

        let direction = desc.direction;
        window(&mapped.gpio, desc.bank)?
            .write_bits(
                direction.offset,
                direction.bit,
                1,
                u32::from(mode == PinMode::Output),
            )
            .map_err(|source| register_failure(desc, direction.offset, source))
    }

    fn map_regions(
        mem: &MemDevice,
        regions: &[Region],
        region: &'static str,
    ) -> Result<Vec<RegisterWindow>> {
        regions
            .iter()
            .map(|r| {
                mem.map(r.base, r.len).map_err(|source| {
                    error!(
                        "failed to map the {} {} {region} memory address {:#x}: {source}",
                        C::BRAND,
                        C::CHIP,
                        r.base
                    );
                    GpioError::Map {
                        chip: C::CHIP,
                        region,
                        base: r.base,
                        source,
                    }
                })
            })
            .collect()
    }

    /// Hand an interrupt line back to the kernel if it is still exported.
    fn release_line(&self, desc: &PinDescriptor) -> Result<()> {
        if !sysfs::is_exported(&self.config.class_line_dir(desc.line)) {
            return Ok(());
        }

        let class_dir = self.config.gpio_class_dir();
        sysfs::unexport(&class_dir, desc.line)
            .map_err(|source| sysfs_failure(class_dir.join("unexport"), source))
    }

    fn value_path(&self, desc: &PinDescriptor) -> PathBuf {
        C::line_dir(&self.config, desc).join("value")
    }
}

impl<C: Soc> GpioDriver for SocDriver<C> {
    type Error = GpioError;

    fn setup(&mut self) -> Result<()> {
        if self.mapped.is_some() {
            error!("The {} {} has already been set up", C::BRAND, C::CHIP);
            return Err(GpioError::AlreadySetup(C::CHIP));
        }

        let path = &self.config.mem_device;
        let mem = MemDevice::open(path).map_err(|source| {
            error!(
                "failed to open {} for raw memory access: {source}",
                path.display()
            );
            GpioError::MemDevice {
                path: path.clone(),
                source,
            }
        })?;

        // A failure here drops whatever was mapped so far.
        let gpio = Self::map_regions(&mem, C::gpio_regions(), "GPIO")?;
        let pads = Self::map_regions(&mem, C::pad_regions(), "pad")?;

        info!(
            "The {} {} is set up: {} GPIO and {} pad windows",
            C::BRAND,
            C::CHIP,
            gpio.len(),
            pads.len()
        );
        self.mapped = Some(Mapped { gpio, pads, mem });

        Ok(())
    }

    fn set_map(&mut self, map: &'static [i32]) {
        debug!("{} pin map installed ({} pins)", C::CHIP, map.len());
        self.map = Some(map);
    }

    fn set_irq(&mut self, irq: &'static [i32]) {
        debug!("{} interrupt map installed ({} pins)", C::CHIP, irq.len());
        self.irq = Some(irq);
    }

    fn pin_name(&self, pin: usize) -> Result<&'static str> {
        Ok(self.descriptor(pin)?.name)
    }

    fn pin_mode(&mut self, pin: usize, mode: PinMode) -> Result<()> {
        if !matches!(mode, PinMode::Input | PinMode::Output) {
            error!("invalid pin mode {mode:?} for GPIO {pin}");
            return Err(GpioError::InvalidMode { pin, mode });
        }

        let index = self.locate(pin, MapKind::Pins)?;
        let desc = &C::layout()[index];
        self.mapped()?;

        if let PinState::Interrupt(_) = self.pins[index] {
            self.release_line(desc)?;
            self.pins[index] = PinState::NotSet;
        }

        Self::configure(self.mapped()?, desc, mode)?;

        self.pins[index] = match mode {
            PinMode::Output => PinState::Output,
            _ => PinState::Input,
        };

        Ok(())
    }

    fn digital_write(&mut self, pin: usize, level: PinLevel) -> Result<()> {
        let index = self.locate(pin, MapKind::Pins)?;
        let mapped = self.mapped()?;
        self.expect_mode(pin, index, PinMode::Output)?;

        let desc = &C::layout()[index];
        let out = desc.data_out;
        window(&mapped.gpio, desc.bank)?
            .write_bits(out.offset, out.bit, 1, level as u32)
            .map_err(|source| register_failure(desc, out.offset, source))
    }

    fn digital_read(&self, pin: usize) -> Result<PinLevel> {
        let index = self.locate(pin, MapKind::Pins)?;
        let mapped = self.mapped()?;
        self.expect_mode(pin, index, PinMode::Input)?;

        let desc = &C::layout()[index];
        let input = desc.data_in;
        let bit = window(&mapped.gpio, desc.bank)?
            .read_bits(input.offset, input.bit, 1)
            .map_err(|source| register_failure(desc, input.offset, source))?;

        Ok(PinLevel::from(bit != 0))
    }

    fn isr(&mut self, pin: usize, edge: Edge) -> Result<()> {
        if !C::ISR_MODES.contains(edge.flag()) {
            error!("The {} {} does not support {edge:?} interrupts", C::BRAND, C::CHIP);
            return Err(GpioError::UnsupportedEdge {
                chip: C::CHIP,
                edge,
            });
        }

        let index = self.locate(pin, MapKind::Irq)?;
        self.mapped()?;
        let desc = &C::layout()[index];

        if !sysfs::is_exported(&self.config.class_line_dir(desc.line)) {
            let class_dir = self.config.gpio_class_dir();
            sysfs::export(&class_dir, desc.line)
                .map_err(|source| sysfs_failure(class_dir.join("export"), source))?;
        }

        let line_dir = C::line_dir(&self.config, desc);

        let direction = line_dir.join("direction");
        sysfs::write_attr(&direction, "in").map_err(|source| sysfs_failure(direction, source))?;

        let edge_path = line_dir.join("edge");
        sysfs::write_attr(&edge_path, edge.token())
            .map_err(|source| sysfs_failure(edge_path, source))?;

        let value_path = line_dir.join("value");
        let value =
            sysfs::open_value(&value_path).map_err(|source| sysfs_failure(value_path, source))?;

        info!(
            "GPIO{pin} ({}, line {}) armed for {} edges",
            desc.name,
            desc.line,
            edge.token()
        );
        self.pins[index] = PinState::Interrupt(value);

        Ok(())
    }

    fn wait_for_interrupt(&self, pin: usize, timeout_ms: i32) -> Result<InterruptStatus> {
        let index = self.locate(pin, MapKind::Irq)?;
        self.mapped()?;

        let value = self.interrupt_value(pin, index)?;

        match sysfs::wait_for_edge(value, timeout_ms) {
            Ok(Wake::Edge) => Ok(InterruptStatus::Triggered),
            Ok(Wake::Timeout) => Ok(InterruptStatus::Timeout),
            Err(source) => Err(sysfs_failure(self.value_path(&C::layout()[index]), source)),
        }
    }

    fn selectable_fd(&self, pin: usize) -> Result<RawFd> {
        let index = self.locate(pin, MapKind::Irq)?;
        self.mapped()?;

        Ok(self.interrupt_value(pin, index)?.as_raw_fd())
    }

    fn gc(&mut self) -> Result<()> {
        let mut first_error = None;
        let mapped = self.mapped.take();

        for (index, desc) in C::layout().iter().enumerate() {
            match std::mem::take(&mut self.pins[index]) {
                PinState::Output => match &mapped {
                    Some(mapped) => {
                        if let Err(err) = Self::configure(mapped, desc, PinMode::Input) {
                            first_error.get_or_insert(err);
                        } else {
                            debug!("{} reverted to input", desc.name);
                        }
                    }
                    None => warn!("{} left as output: registers are not mapped", desc.name),
                },
                PinState::Interrupt(value) => {
                    if let Err(err) = self.release_line(desc) {
                        first_error.get_or_insert(err);
                    }
                    drop(value);
                }
                PinState::Input | PinState::NotSet => {}
            }
        }

        if mapped.is_some() {
            drop(mapped);
            info!("The {} {} register windows are released", C::BRAND, C::CHIP);
        }

        first_error.map_or(Ok(()), Err)
    }
}

impl<C: Soc> Drop for SocDriver<C> {
    fn drop(&mut self) {
        if let Err(err) = self.gc() {
            warn!("teardown of the {} {} failed: {err}", C::BRAND, C::CHIP);
        }
    }
}

fn window(windows: &[RegisterWindow], index: usize) -> Result<&RegisterWindow> {
    windows.get(index).ok_or_else(|| {
        error!("register window {index} is not mapped");
        GpioError::Register {
            offset: 0,
            source: io::Error::new(io::ErrorKind::NotFound, "window not mapped"),
        }
    })
}

fn mode_mismatch<C: Soc>(pin: usize, expected: PinMode, actual: PinMode) -> GpioError {
    error!(
        "The {} {} GPIO{pin} is not set to {expected:?} mode",
        C::BRAND,
        C::CHIP
    );
    GpioError::ModeMismatch {
        pin,
        expected,
        actual,
    }
}

fn invalid_pin(pin: usize) -> GpioError {
    error!("{pin} is not a valid GPIO number");
    GpioError::InvalidPin { pin }
}

fn register_failure(desc: &PinDescriptor, offset: usize, source: io::Error) -> GpioError {
    error!("{} register access at {offset:#x} failed: {source}", desc.name);
    GpioError::Register { offset, source }
}

fn sysfs_failure(path: PathBuf, source: io::Error) -> GpioError {
    error!("sysfs operation on {} failed: {source}", path.display());
    GpioError::Sysfs { path, source }
}
