//! T-Head SoC support

use super::Soc;
use crate::hal::gpio::IsrModes;
use crate::hw::layout::{PinDescriptor, Region};
use crate::hw::th1520;

/// T-Head TH1520 (Milk-V Meles).
#[derive(Debug, Copy, Clone)]
pub struct Th1520;

impl Soc for Th1520 {
    const BRAND: &'static str = "T-Head";
    const CHIP: &'static str = "TH1520";
    const ISR_MODES: IsrModes = IsrModes::all();
    const MUX_WIDTH: u32 = th1520::PAD_FIELD_WIDTH;

    fn gpio_regions() -> &'static [Region] {
        &th1520::GPIO_REGIONS
    }

    fn pad_regions() -> &'static [Region] {
        &th1520::PAD_REGIONS
    }

    fn layout() -> &'static [PinDescriptor] {
        &th1520::LAYOUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverConfig;
    use crate::hal::gpio::{GpioDriver, PinLevel, PinMode};
    use crate::platform::SocDriver;
    use std::fs;
    use std::io::{Read, Seek, SeekFrom, Write};
    use std::path::Path;

    const WINDOW: u64 = th1520::PAGE_SIZE as u64;

    /// The TH1520 tables with every window moved near address zero.
    struct Relocated;

    static GPIO: [Region; 4] = [
        Region { base: 0, len: th1520::PAGE_SIZE },
        Region { base: WINDOW, len: th1520::PAGE_SIZE },
        Region { base: 2 * WINDOW, len: th1520::PAGE_SIZE },
        Region { base: 3 * WINDOW, len: th1520::PAGE_SIZE },
    ];

    static PADS: [Region; 4] = [
        Region { base: 4 * WINDOW, len: th1520::PAGE_SIZE },
        Region { base: 5 * WINDOW, len: th1520::PAGE_SIZE },
        Region { base: 6 * WINDOW, len: th1520::PAGE_SIZE },
        Region { base: 7 * WINDOW, len: th1520::PAGE_SIZE },
    ];

    impl Soc for Relocated {
        const BRAND: &'static str = Th1520::BRAND;
        const CHIP: &'static str = Th1520::CHIP;
        const ISR_MODES: IsrModes = Th1520::ISR_MODES;
        const MUX_WIDTH: u32 = Th1520::MUX_WIDTH;

        fn gpio_regions() -> &'static [Region] {
            &GPIO
        }

        fn pad_regions() -> &'static [Region] {
            &PADS
        }

        fn layout() -> &'static [PinDescriptor] {
            Th1520::layout()
        }
    }

    fn word(mem: &Path, pos: u64) -> u32 {
        let mut file = fs::File::open(mem).unwrap();
        file.seek(SeekFrom::Start(pos)).unwrap();
        let mut buf = [0u8; 4];
        file.read_exact(&mut buf).unwrap();
        u32::from_ne_bytes(buf)
    }

    fn poke(mem: &Path, pos: u64, value: u32) {
        let mut file = fs::OpenOptions::new().write(true).open(mem).unwrap();
        file.seek(SeekFrom::Start(pos)).unwrap();
        file.write_all(&value.to_ne_bytes()).unwrap();
    }

    #[test]
    fn drives_the_real_layout() {
        // GPIO0_17, GPIO2_8, GPIO3_6.
        static MAP: [i32; 3] = [17, 72, 102];

        let dir = tempfile::tempdir().unwrap();
        let mem = dir.path().join("mem");
        fs::File::create(&mem).unwrap().set_len(8 * WINDOW).unwrap();
        let pad = |group: u64, offset: usize| (4 + group) * WINDOW + offset as u64;
        poke(&mem, pad(2, th1520::G3_MUXCFG_005), u32::MAX);

        let mut soc = SocDriver::<Relocated>::new(DriverConfig::new(mem.clone(), dir.path()));
        soc.set_map(&MAP);
        soc.setup().unwrap();

        soc.pin_mode(0, PinMode::Output).unwrap();
        soc.digital_write(0, PinLevel::High).unwrap();
        assert_eq!(word(&mem, pad(1, th1520::G2_MUXCFG_003)), 0x3 << 4);
        assert_eq!(word(&mem, 0x4), 1 << 17);
        assert_eq!(word(&mem, 0x0), 1 << 17);

        // Only the 4-bit function field of pad group 2 changes.
        soc.pin_mode(2, PinMode::Output).unwrap();
        assert_eq!(word(&mem, pad(2, th1520::G3_MUXCFG_005)), 0xf3ff_ffff);
        assert_eq!(word(&mem, 3 * WINDOW + 0x4), 1 << 6);

        // GPIO2_8 samples bit 18 of its input register, as the table says.
        soc.pin_mode(1, PinMode::Input).unwrap();
        assert_eq!(word(&mem, pad(2, th1520::G3_MUXCFG_002)), 0x3);
        poke(&mem, 2 * WINDOW + 0x50, 1 << 8);
        assert_eq!(soc.digital_read(1).unwrap(), PinLevel::Low);
        poke(&mem, 2 * WINDOW + 0x50, 1 << 18);
        assert_eq!(soc.digital_read(1).unwrap(), PinLevel::High);
    }

    #[test]
    fn line_dir_is_the_class_entry() {
        let config = DriverConfig::default();
        assert_eq!(
            Th1520::line_dir(&config, &th1520::LAYOUT[17]),
            Path::new("/sys/class/gpio/gpio17")
        );
    }
}
