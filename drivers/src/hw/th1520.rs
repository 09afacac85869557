//! T-Head TH1520 GPIO register map.
//!
//! Four GPIO controllers and four pad-control groups, each mapped as one
//! 64 KiB window. Every pad-control register packs eight 4-bit function
//! fields, one per pin.

use super::layout::{Multiplex, PinDescriptor, RegField, Region};

/// Size of every mapped window.
pub const PAGE_SIZE: usize = 64 * 1024;

pub const GPIO_GROUP_COUNT: usize = 4;
pub const PAD_GROUP_COUNT: usize = 4;

/// Physical base address of each GPIO controller.
pub const GPIO_BASES: [u64; GPIO_GROUP_COUNT] =
    [0xff_ec00_5000, 0xff_ec00_6000, 0xff_e7f3_4000, 0xff_e7f3_8000];

/// Physical base address of each pad-control group.
pub const PAD_BASES: [u64; PAD_GROUP_COUNT] =
    [0xff_fff4_a000, 0xff_e7f3_c000, 0xff_ec00_7000, 0xff_cb01_d000];

/// Output data register.
pub const GPIO_SWPORTA_DR: usize = 0x0000;
/// Direction register, `1` = output.
pub const GPIO_SWPORTA_DDR: usize = 0x0004;
/// External port (input level) register.
pub const GPIO_EXT_PORTA: usize = 0x0050;

/// Width of one pad function field.
pub const PAD_FIELD_WIDTH: u32 = 4;

// Pad group 2 multiplexer registers.
pub const G2_MUXCFG_001: usize = 0x400;
pub const G2_MUXCFG_002: usize = 0x404;
pub const G2_MUXCFG_003: usize = 0x408;
pub const G2_MUXCFG_004: usize = 0x40c;
pub const G2_MUXCFG_005: usize = 0x410;
pub const G2_MUXCFG_006: usize = 0x414;
pub const G2_MUXCFG_007: usize = 0x418;
pub const G2_MUXCFG_008: usize = 0x41c;

// Pad group 3 multiplexer registers.
pub const G3_MUXCFG_001: usize = 0x400;
pub const G3_MUXCFG_002: usize = 0x404;
pub const G3_MUXCFG_003: usize = 0x408;
pub const G3_MUXCFG_004: usize = 0x40c;
pub const G3_MUXCFG_005: usize = 0x410;
pub const G3_MUXCFG_006: usize = 0x414;
pub const G3_MUXCFG_007: usize = 0x418;

pub static GPIO_REGIONS: [Region; GPIO_GROUP_COUNT] = [
    Region { base: GPIO_BASES[0], len: PAGE_SIZE },
    Region { base: GPIO_BASES[1], len: PAGE_SIZE },
    Region { base: GPIO_BASES[2], len: PAGE_SIZE },
    Region { base: GPIO_BASES[3], len: PAGE_SIZE },
];

pub static PAD_REGIONS: [Region; PAD_GROUP_COUNT] = [
    Region { base: PAD_BASES[0], len: PAGE_SIZE },
    Region { base: PAD_BASES[1], len: PAGE_SIZE },
    Region { base: PAD_BASES[2], len: PAGE_SIZE },
    Region { base: PAD_BASES[3], len: PAGE_SIZE },
];

/// `line` is the sysfs line number, which on this chip is the pin's index
/// in [`LAYOUT`].
#[allow(clippy::too_many_arguments)]
const fn pin(
    name: &'static str,
    line: u32,
    pad: usize,
    bank: usize,
    (mux_offset, mux_bit, function): (usize, u32, u32),
    direction: u32,
    out: u32,
    input: u32,
) -> PinDescriptor {
    PinDescriptor {
        name,
        bank,
        line,
        multiplex: Multiplex {
            window: pad,
            offset: mux_offset,
            bit: mux_bit,
            value: function,
        },
        direction: RegField { offset: GPIO_SWPORTA_DDR, bit: direction },
        data_out: RegField { offset: GPIO_SWPORTA_DR, bit: out },
        data_in: RegField { offset: GPIO_EXT_PORTA, bit: input },
        available: true,
    }
}

// Several entries below carry bits or pad fields that do not follow the pin
// name (GPIO1_23..GPIO1_30, GPIO2_8, GPIO2_9, GPIO2_23, GPIO2_27, GPIO3_8,
// GPIO3_9) and two placeholders repeat a name. They are kept exactly as
// measured and need bench verification before being changed.
#[rustfmt::skip]
pub static LAYOUT: [PinDescriptor; 130] = [
    pin("GPIO0_0", 0, 1, 0, (G2_MUXCFG_001, 0, 0x3), 0, 0, 0),
    pin("GPIO0_1", 1, 1, 0, (G2_MUXCFG_001, 4, 0x3), 1, 1, 1),
    pin("GPIO0_2", 2, 1, 0, (G2_MUXCFG_001, 8, 0x3), 2, 2, 2),
    pin("GPIO0_3", 3, 1, 0, (G2_MUXCFG_001, 12, 0x3), 3, 3, 3),
    pin("GPIO0_4", 4, 1, 0, (G2_MUXCFG_001, 16, 0x3), 4, 4, 4),
    pin("GPIO0_5", 5, 1, 0, (G2_MUXCFG_001, 20, 0x3), 5, 5, 5),
    pin("GPIO0_6", 6, 1, 0, (G2_MUXCFG_001, 24, 0x3), 6, 6, 6),
    pin("GPIO0_7", 7, 1, 0, (G2_MUXCFG_001, 28, 0x3), 7, 7, 7),
    pin("GPIO0_8", 8, 1, 0, (G2_MUXCFG_002, 0, 0x3), 8, 8, 8),
    pin("GPIO0_9", 9, 1, 0, (G2_MUXCFG_002, 4, 0x3), 9, 9, 9),
    pin("GPIO0_10", 10, 1, 0, (G2_MUXCFG_002, 8, 0x3), 10, 10, 10),
    pin("GPIO0_11", 11, 1, 0, (G2_MUXCFG_002, 12, 0x3), 11, 11, 11),
    pin("GPIO0_12", 12, 1, 0, (G2_MUXCFG_002, 16, 0x3), 12, 12, 12),
    pin("GPIO0_13", 13, 1, 0, (G2_MUXCFG_002, 20, 0x3), 13, 13, 13),
    pin("GPIO0_14", 14, 1, 0, (G2_MUXCFG_002, 24, 0x3), 14, 14, 14),
    pin("GPIO0_15", 15, 1, 0, (G2_MUXCFG_006, 28, 0x3), 15, 15, 15),
    pin("GPIO0_16", 16, 1, 0, (G2_MUXCFG_003, 0, 0x3), 16, 16, 16),
    pin("GPIO0_17", 17, 1, 0, (G2_MUXCFG_003, 4, 0x3), 17, 17, 17),
    pin("GPIO0_18", 18, 1, 0, (G2_MUXCFG_003, 8, 0x0), 18, 18, 18),
    pin("GPIO0_19", 19, 1, 0, (G2_MUXCFG_003, 12, 0x0), 19, 19, 19),
    pin("GPIO0_20", 20, 1, 0, (G2_MUXCFG_003, 16, 0x0), 20, 20, 20),
    pin("GPIO0_21", 21, 1, 0, (G2_MUXCFG_003, 20, 0x0), 21, 21, 21),
    pin("GPIO0_22", 22, 1, 0, (G2_MUXCFG_003, 24, 0x0), 22, 22, 22),
    pin("GPIO0_23", 23, 1, 0, (G2_MUXCFG_003, 28, 0x0), 23, 23, 23),
    pin("GPIO0_24", 24, 1, 0, (G2_MUXCFG_004, 0, 0x0), 24, 24, 24),
    pin("GPIO0_25", 25, 1, 0, (G2_MUXCFG_004, 4, 0x0), 25, 25, 25),
    pin("GPIO0_26", 26, 1, 0, (G2_MUXCFG_004, 8, 0x0), 26, 26, 26),
    pin("GPIO0_27", 27, 1, 0, (G2_MUXCFG_004, 12, 0x0), 27, 27, 27),
    pin("GPIO0_28", 28, 1, 0, (G2_MUXCFG_004, 16, 0x0), 28, 28, 28),
    pin("GPIO0_29", 29, 1, 0, (G2_MUXCFG_004, 20, 0x0), 29, 29, 29),
    pin("GPIO0_30", 30, 1, 0, (G2_MUXCFG_004, 24, 0x0), 30, 30, 30),
    pin("GPIO0_31", 31, 1, 0, (G2_MUXCFG_004, 28, 0x0), 31, 31, 31),
    pin("GPIO1_0", 32, 1, 1, (G2_MUXCFG_005, 0, 0x0), 0, 0, 0),
    pin("GPIO1_1", 33, 1, 1, (G2_MUXCFG_005, 4, 0x0), 1, 1, 1),
    pin("GPIO1_2", 34, 1, 1, (G2_MUXCFG_005, 8, 0x0), 2, 2, 2),
    pin("GPIO1_3", 35, 1, 1, (G2_MUXCFG_005, 12, 0x0), 3, 3, 3),
    pin("GPIO1_4", 36, 1, 1, (G2_MUXCFG_005, 16, 0x0), 4, 4, 4),
    pin("GPIO1_5", 37, 1, 1, (G2_MUXCFG_005, 20, 0x0), 5, 5, 5),
    pin("GPIO1_6", 38, 1, 1, (G2_MUXCFG_005, 24, 0x0), 6, 6, 6),
    pin("GPIO1_7", 39, 1, 1, (G2_MUXCFG_005, 28, 0x0), 7, 7, 7),
    pin("GPIO1_8", 40, 1, 1, (G2_MUXCFG_006, 0, 0x0), 8, 8, 8),
    pin("GPIO1_9", 41, 1, 1, (G2_MUXCFG_006, 4, 0x0), 9, 9, 9),
    pin("GPIO1_10", 42, 1, 1, (G2_MUXCFG_006, 8, 0x0), 10, 10, 10),
    pin("GPIO1_11", 43, 1, 1, (G2_MUXCFG_006, 12, 0x0), 11, 11, 11),
    pin("GPIO1_12", 44, 1, 1, (G2_MUXCFG_006, 16, 0x0), 12, 12, 12),
    pin("GPIO1_13", 45, 1, 1, (G2_MUXCFG_006, 20, 0x0), 13, 13, 13),
    pin("GPIO1_14", 46, 1, 1, (G2_MUXCFG_006, 24, 0x0), 14, 14, 14),
    pin("GPIO1_15", 47, 1, 1, (G2_MUXCFG_006, 28, 0x0), 15, 15, 15),
    pin("GPIO1_16", 48, 1, 1, (G2_MUXCFG_007, 0, 0x0), 16, 16, 16),
    pin("GPIO1_17", 49, 1, 1, (G2_MUXCFG_007, 4, 0x3), 17, 17, 17),
    pin("GPIO1_18", 50, 1, 1, (G2_MUXCFG_007, 8, 0x3), 18, 18, 18),
    pin("GPIO1_19", 51, 1, 1, (G2_MUXCFG_007, 12, 0x3), 19, 19, 19),
    pin("GPIO1_20", 52, 1, 1, (G2_MUXCFG_007, 16, 0x3), 20, 20, 20),
    pin("GPIO1_21", 53, 1, 1, (G2_MUXCFG_007, 20, 0x3), 21, 21, 21),
    pin("GPIO1_22", 54, 1, 1, (G2_MUXCFG_007, 24, 0x3), 22, 22, 22),
    pin("GPIO1_23", 55, 1, 1, (G2_MUXCFG_007, 28, 0x3), 22, 22, 22),
    pin("GPIO1_24", 56, 1, 1, (G2_MUXCFG_008, 0, 0x0), 16, 16, 16),
    pin("GPIO1_25", 57, 1, 1, (G2_MUXCFG_008, 4, 0x3), 17, 17, 17),
    pin("GPIO1_26", 58, 1, 1, (G2_MUXCFG_008, 8, 0x0), 18, 18, 18),
    pin("GPIO1_27", 59, 1, 1, (G2_MUXCFG_008, 12, 0x0), 19, 19, 19),
    pin("GPIO1_28", 60, 1, 1, (G2_MUXCFG_008, 16, 0x0), 20, 20, 20),
    pin("GPIO1_29", 61, 1, 1, (G2_MUXCFG_008, 20, 0x0), 21, 21, 21),
    pin("GPIO1_30", 62, 1, 1, (G2_MUXCFG_008, 24, 0x0), 22, 22, 22),
    PinDescriptor::unavailable("GPIO1_31"),
    pin("GPIO2_0", 64, 2, 2, (G3_MUXCFG_001, 0, 0x3), 0, 0, 0),
    pin("GPIO2_1", 65, 2, 2, (G3_MUXCFG_001, 4, 0x3), 1, 1, 1),
    pin("GPIO2_2", 66, 2, 2, (G3_MUXCFG_001, 8, 0x3), 2, 2, 2),
    pin("GPIO2_3", 67, 2, 2, (G3_MUXCFG_001, 12, 0x3), 3, 3, 3),
    pin("GPIO2_4", 68, 2, 2, (G3_MUXCFG_001, 16, 0x3), 4, 4, 4),
    pin("GPIO2_5", 69, 2, 2, (G3_MUXCFG_001, 20, 0x3), 5, 5, 5),
    pin("GPIO2_6", 70, 2, 2, (G3_MUXCFG_001, 24, 0x3), 6, 6, 6),
    pin("GPIO2_7", 71, 2, 2, (G3_MUXCFG_001, 28, 0x3), 7, 7, 7),
    pin("GPIO2_8", 72, 2, 2, (G3_MUXCFG_002, 0, 0x3), 8, 8, 18),
    pin("GPIO2_9", 73, 2, 2, (G3_MUXCFG_002, 4, 0x3), 9, 9, 19),
    pin("GPIO2_10", 74, 2, 2, (G3_MUXCFG_002, 8, 0x3), 10, 10, 10),
    pin("GPIO2_11", 75, 2, 2, (G3_MUXCFG_002, 12, 0x3), 11, 11, 11),
    pin("GPIO2_12", 76, 2, 2, (G3_MUXCFG_002, 16, 0x3), 12, 12, 12),
    pin("GPIO2_13", 77, 2, 2, (G3_MUXCFG_002, 20, 0x0), 13, 13, 13),
    pin("GPIO2_14", 78, 2, 2, (G3_MUXCFG_002, 24, 0x3), 14, 14, 14),
    pin("GPIO2_15", 79, 2, 2, (G3_MUXCFG_002, 28, 0x3), 15, 15, 15),
    pin("GPIO2_16", 80, 2, 2, (G3_MUXCFG_003, 0, 0x3), 16, 16, 16),
    pin("GPIO2_17", 81, 2, 2, (G3_MUXCFG_003, 4, 0x3), 17, 17, 17),
    pin("GPIO2_18", 82, 2, 2, (G3_MUXCFG_003, 8, 0x0), 18, 18, 18),
    pin("GPIO2_19", 83, 2, 2, (G3_MUXCFG_003, 12, 0x0), 19, 19, 19),
    pin("GPIO2_20", 84, 2, 2, (G3_MUXCFG_003, 16, 0x0), 20, 20, 20),
    pin("GPIO2_21", 85, 2, 2, (G3_MUXCFG_003, 20, 0x0), 21, 21, 21),
    pin("GPIO2_22", 86, 2, 2, (G3_MUXCFG_003, 24, 0x0), 22, 22, 22),
    pin("GPIO2_23", 87, 2, 2, (G3_MUXCFG_003, 28, 0x0), 23, 22, 22),
    pin("GPIO2_24", 88, 2, 2, (G3_MUXCFG_004, 0, 0x0), 24, 24, 24),
    pin("GPIO2_25", 89, 2, 2, (G3_MUXCFG_004, 4, 0x0), 25, 25, 25),
    pin("GPIO2_26", 90, 2, 2, (G3_MUXCFG_004, 8, 0x3), 26, 26, 26),
    pin("GPIO2_27", 91, 2, 2, (G3_MUXCFG_004, 10, 0x3), 27, 27, 27),
    pin("GPIO2_28", 92, 2, 2, (G3_MUXCFG_004, 16, 0x3), 28, 28, 28),
    pin("GPIO2_29", 93, 2, 2, (G3_MUXCFG_004, 20, 0x3), 29, 29, 29),
    pin("GPIO2_30", 94, 2, 2, (G3_MUXCFG_004, 24, 0x0), 30, 30, 30),
    pin("GPIO2_31", 95, 2, 2, (G3_MUXCFG_004, 28, 0x0), 31, 31, 31),
    pin("GPIO3_0", 96, 2, 3, (G3_MUXCFG_005, 0, 0x0), 0, 0, 0),
    pin("GPIO3_1", 97, 2, 3, (G3_MUXCFG_005, 4, 0x0), 1, 1, 1),
    pin("GPIO3_2", 98, 2, 3, (G3_MUXCFG_005, 8, 0x0), 2, 2, 2),
    pin("GPIO3_3", 99, 2, 3, (G3_MUXCFG_005, 12, 0x0), 3, 3, 3),
    pin("GPIO3_4", 100, 2, 3, (G3_MUXCFG_005, 16, 0x3), 4, 4, 4),
    pin("GPIO3_5", 101, 2, 3, (G3_MUXCFG_005, 20, 0x3), 5, 5, 5),
    pin("GPIO3_6", 102, 2, 3, (G3_MUXCFG_005, 24, 0x3), 6, 6, 6),
    pin("GPIO3_7", 103, 2, 3, (G3_MUXCFG_005, 28, 0x3), 7, 7, 7),
    pin("GPIO3_8", 104, 2, 3, (G3_MUXCFG_006, 0, 0x3), 8, 8, 18),
    pin("GPIO3_9", 105, 2, 3, (G3_MUXCFG_006, 4, 0x3), 9, 9, 19),
    pin("GPIO3_10", 106, 2, 3, (G3_MUXCFG_006, 8, 0x3), 10, 10, 10),
    pin("GPIO3_11", 107, 2, 3, (G3_MUXCFG_006, 12, 0x3), 11, 11, 11),
    pin("GPIO3_12", 108, 2, 3, (G3_MUXCFG_006, 16, 0x3), 12, 12, 12),
    pin("GPIO3_13", 109, 2, 3, (G3_MUXCFG_006, 20, 0x3), 13, 13, 13),
    pin("GPIO3_14", 110, 2, 3, (G3_MUXCFG_006, 24, 0x3), 14, 14, 14),
    pin("GPIO3_15", 111, 2, 3, (G3_MUXCFG_006, 28, 0x3), 15, 15, 15),
    pin("GPIO3_16", 112, 2, 3, (G3_MUXCFG_007, 0, 0x3), 16, 16, 16),
    pin("GPIO3_17", 113, 2, 3, (G3_MUXCFG_007, 4, 0x3), 17, 17, 17),
    pin("GPIO3_18", 114, 2, 3, (G3_MUXCFG_007, 8, 0x3), 18, 18, 18),
    pin("GPIO3_19", 115, 2, 3, (G3_MUXCFG_007, 12, 0x3), 19, 19, 19),
    pin("GPIO3_20", 116, 2, 3, (G3_MUXCFG_007, 16, 0x3), 20, 20, 20),
    pin("GPIO3_21", 117, 2, 3, (G3_MUXCFG_007, 20, 0x3), 21, 21, 21),
    pin("GPIO3_22", 118, 2, 3, (G3_MUXCFG_007, 24, 0x3), 22, 22, 22),
    PinDescriptor::unavailable("GPIO3_22"),
    PinDescriptor::unavailable("GPIO3_23"),
    PinDescriptor::unavailable("GPIO3_24"),
    PinDescriptor::unavailable("GPIO3_25"),
    PinDescriptor::unavailable("GPIO3_25"),
    PinDescriptor::unavailable("GPIO3_26"),
    PinDescriptor::unavailable("GPIO3_27"),
    PinDescriptor::unavailable("GPIO3_28"),
    PinDescriptor::unavailable("GPIO3_29"),
    PinDescriptor::unavailable("GPIO3_30"),
    PinDescriptor::unavailable("GPIO3_31"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_numbers_follow_table_order() {
        for (index, pin) in LAYOUT.iter().enumerate() {
            if pin.available {
                assert_eq!(pin.line as usize, index, "{}", pin.name);
            }
        }
    }

    #[test]
    fn every_pin_fits_its_windows() {
        for pin in LAYOUT.iter().filter(|pin| pin.available) {
            assert!(pin.bank < GPIO_GROUP_COUNT, "{}", pin.name);
            assert!(pin.multiplex.window < PAD_GROUP_COUNT, "{}", pin.name);
            assert!(pin.multiplex.bit + PAD_FIELD_WIDTH <= 32, "{}", pin.name);
            assert!(pin.multiplex.offset + 4 <= PAGE_SIZE, "{}", pin.name);
        }
    }

    #[test]
    fn placeholders_are_unavailable() {
        assert_eq!(LAYOUT[63].name, "GPIO1_31");
        assert!(!LAYOUT[63].available);
        assert!(LAYOUT[119..].iter().all(|pin| !pin.available));
    }

    #[test]
    fn gpio2_8_reads_bit_18() {
        // Kept literally, see the table comment.
        let pin = &LAYOUT[72];
        assert_eq!(pin.name, "GPIO2_8");
        assert_eq!(pin.data_out.bit, 8);
        assert_eq!(pin.data_in.bit, 18);
    }
}
