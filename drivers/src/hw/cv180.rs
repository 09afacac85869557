//! Sophgo CV180 GPIO register map.
//!
//! The CV180 has four DesignWare-style GPIO controllers, each in its own
//! 4 KiB page, and one pin-multiplexer block. Multiplexer registers hold a
//! single function-select value and are written whole.

use super::layout::{Multiplex, PinDescriptor, RegField, Region};

/// Size of one GPIO controller page.
pub const PAGE_SIZE: usize = 4 * 1024;

/// Number of GPIO controllers.
pub const GPIO_GROUP_COUNT: usize = 4;

/// Physical base address of each GPIO controller.
pub const GPIO_BASES: [u64; GPIO_GROUP_COUNT] = [0x0302_0000, 0x0302_1000, 0x0302_2000, 0x0502_1000];

/// Physical base address of the pin-multiplexer block.
pub const PINMUX_BASE: u64 = 0x0300_0000;

/// The multiplexer registers used below sit at `0x1000..0x1100`, past the
/// first page of the block.
pub const PINMUX_LEN: usize = 2 * PAGE_SIZE;

/// Output data register.
pub const GPIO_SWPORTA_DR: usize = 0x000;
/// Direction register, `1` = output.
pub const GPIO_SWPORTA_DDR: usize = 0x004;
/// External port (input level) register.
pub const GPIO_EXT_PORTA: usize = 0x050;

/// Multiplexer registers are written as a whole.
pub const PINMUX_WIDTH: u32 = 32;

pub static GPIO_REGIONS: [Region; GPIO_GROUP_COUNT] = [
    Region { base: GPIO_BASES[0], len: PAGE_SIZE },
    Region { base: GPIO_BASES[1], len: PAGE_SIZE },
    Region { base: GPIO_BASES[2], len: PAGE_SIZE },
    Region { base: GPIO_BASES[3], len: PAGE_SIZE },
];

pub static PAD_REGIONS: [Region; 1] = [Region {
    base: PINMUX_BASE,
    len: PINMUX_LEN,
}];

const fn pin(
    name: &'static str,
    group: usize,
    line: u32,
    pinmux: usize,
    function: u32,
    bit: u32,
) -> PinDescriptor {
    PinDescriptor {
        name,
        bank: group,
        line,
        multiplex: Multiplex {
            window: 0,
            offset: pinmux,
            bit: 0,
            value: function,
        },
        direction: RegField { offset: GPIO_SWPORTA_DDR, bit },
        data_out: RegField { offset: GPIO_SWPORTA_DR, bit },
        data_in: RegField { offset: GPIO_EXT_PORTA, bit },
        available: true,
    }
}

#[rustfmt::skip]
pub static LAYOUT: [PinDescriptor; 25] = [
    pin("XGPIOA_28", 0, 508, 0x104c, 0x3, 28),
    pin("XGPIOA_29", 0, 509, 0x1050, 0x3, 29),
    pin("PWR_GPIO_26", 3, 406, 0x1084, 0x3, 26),
    pin("PWR_GPIO_25", 3, 405, 0x1088, 0x3, 25),
    pin("PWR_GPIO_20", 3, 500, 0x1094, 0x3, 20),
    pin("PWR_GPIO_19", 3, 499, 0x1090, 0x3, 19),
    pin("PWR_GPIO_23", 3, 403, 0x10a0, 0x3, 23),
    pin("PWR_GPIO_22", 3, 402, 0x109c, 0x3, 22),
    pin("PWR_GPIO_21", 3, 401, 0x1098, 0x3, 21),
    pin("PWR_GPIO_18", 3, 398, 0x108c, 0x3, 18),
    pin("XGPIOC_9", 2, 425, 0x10f0, 0x3, 9),
    // Bit 22 does not match the pin name; needs bench verification.
    pin("XGPIOC_10", 2, 426, 0x10f4, 0x3, 22),
    pin("XGPIOA_16", 0, 496, 0x1024, 0x3, 16),
    pin("XGPIOA_17", 0, 497, 0x1028, 0x3, 17),
    pin("XGPIOA_14", 0, 494, 0x101c, 0x1, 14),
    pin("XGPIOA_15", 0, 495, 0x1020, 0x3, 15),
    pin("XGPIOA_23", 0, 503, 0x103c, 0x3, 23),
    pin("XGPIOA_24", 0, 504, 0x1040, 0x3, 24),
    pin("XGPIOA_22", 0, 502, 0x1030, 0x3, 22),
    pin("XGPIOA_25", 0, 505, 0x1034, 0x3, 25),
    pin("XGPIOA_27", 0, 507, 0x1038, 0x3, 27),
    pin("XGPIOA_26", 0, 506, 0x102c, 0x3, 26),
    pin("PWR_GPIO_4", 3, 384, 0x1068, 0x3, 4),
    pin("XGPIOB_3", 2, 454, 0x10a8, 0x3, 3),
    pin("XGPIOB_6", 2, 451, 0x10ac, 0x3, 6),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pin_fits_its_windows() {
        for pin in &LAYOUT {
            assert!(pin.bank < GPIO_GROUP_COUNT, "{}", pin.name);
            assert!(pin.multiplex.offset + 4 <= PINMUX_LEN, "{}", pin.name);
            assert!(pin.data_in.offset + 4 <= PAGE_SIZE, "{}", pin.name);
            assert!(pin.direction.bit < 32, "{}", pin.name);
        }
    }

    #[test]
    fn xgpioc_10_shares_bit_22_with_xgpioa_22() {
        // Kept literally, see the table comment.
        assert_eq!(LAYOUT[11].data_out.bit, 22);
        assert_eq!(LAYOUT[18].data_out.bit, 22);
        assert_ne!(LAYOUT[11].bank, LAYOUT[18].bank);
    }
}
