//! Pin layout data model.
//!
//! A layout table is immutable, per-chip data: one [`PinDescriptor`] per
//! SoC pin describing where its multiplexer field and its direction and
//! data bits live. Runtime state (mode, open descriptors) is kept apart, in
//! the driver.

/// Board map value marking a connector pin with no GPIO behind it.
pub const UNMAPPED: i32 = -1;

/// Location of a single bit inside a bank's register window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegField {
    /// Byte offset of the register from the window base.
    pub offset: usize,
    /// Bit position inside the register.
    pub bit: u32,
}

/// Pad-control field selecting the plain GPIO function of a pin.
///
/// The field width is a per-chip constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Multiplex {
    /// Index of the pad-control window holding the register.
    pub window: usize,
    /// Byte offset of the register from the window base.
    pub offset: usize,
    /// Position of the field's lowest bit.
    pub bit: u32,
    /// Field value selecting GPIO.
    pub value: u32,
}

/// One physical SoC pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinDescriptor {
    pub name: &'static str,
    /// Index of the GPIO register window (bank) the pin belongs to.
    pub bank: usize,
    /// Kernel GPIO line number used for sysfs export.
    pub line: u32,
    pub multiplex: Multiplex,
    pub direction: RegField,
    pub data_out: RegField,
    pub data_in: RegField,
    /// `false` for placeholder slots that have no GPIO function.
    pub available: bool,
}

impl PinDescriptor {
    /// Placeholder entry keeping table indices aligned with the hardware.
    pub const fn unavailable(name: &'static str) -> Self {
        const NOWHERE: RegField = RegField { offset: 0, bit: 0 };

        Self {
            name,
            bank: 0,
            line: 0,
            multiplex: Multiplex {
                window: 0,
                offset: 0,
                bit: 0,
                value: 0,
            },
            direction: NOWHERE,
            data_out: NOWHERE,
            data_in: NOWHERE,
            available: false,
        }
    }
}

/// A run of physical memory mapped as one register window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Region {
    /// Page-aligned physical base address.
    pub base: u64,
    /// Length in bytes.
    pub len: usize,
}
