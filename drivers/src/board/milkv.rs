//! Milk-V boards.
//!
//! Connector pin `n` of each table is the physical header pin `n`; `-1`
//! marks power, ground and other non-GPIO pins.

use super::Board;
use crate::config::DriverConfig;

#[cfg(feature = "cv180")]
use crate::platform::sophgo::Cv180;
#[cfg(feature = "th1520")]
use crate::platform::thead::Th1520;

/// Milk-V Duo header, indexes into the CV180 layout.
#[rustfmt::skip]
pub static DUO_MAP: [i32; 32] = [
    -1,  0,  1, -1,
     2,  3,  5,  4,
    -1,  6,  7,  8,
     9, -1, 10, 11,
    12, 13, -1, 14,
    15, 16, 17, -1,
    18, 19, 20, 21,
    -1, 22, -1, 23,
];

/// Milk-V Meles header, indexes into the TH1520 layout.
#[rustfmt::skip]
pub static MELES_MAP: [i32; 32] = [
    17, -1, 88, 87,
    85, 94, 97, 16,
     9,  8, 78, -1,
    79, 80, 77, 63,
    64, -1, -1, -1,
    -1, 86, 96, 11,
    -1, 95, 10, 98,
    -1, -1, 75, 74,
];

/// Milk-V Duo. Interrupt pins use the header map.
#[cfg(feature = "cv180")]
pub fn duo(config: DriverConfig) -> Board<Cv180> {
    Board::new("Milk-V Duo", &DUO_MAP, &DUO_MAP, config)
}

/// Milk-V Meles. Interrupt pins use the header map.
#[cfg(feature = "th1520")]
pub fn meles(config: DriverConfig) -> Board<Th1520> {
    Board::new("Milk-V Meles", &MELES_MAP, &MELES_MAP, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, GpioError};
    use crate::hal::gpio::{GpioDriver, PinMode};

    #[cfg(feature = "cv180")]
    #[test]
    fn duo_pins() {
        let board = duo(DriverConfig::default());
        assert_eq!(board.name(), "Milk-V Duo");
        assert_eq!(board.pin_count(), 32);

        assert!(!board.valid_gpio(0));
        assert!(board.valid_gpio(1));
        assert!(!board.valid_gpio(28));
        assert!(board.valid_gpio(31));
        assert!(!board.valid_gpio(32));

        // Pin names resolve before setup.
        assert_eq!(board.pin_name(1).unwrap(), "XGPIOA_28");
        assert_eq!(board.pin_name(6).unwrap(), "PWR_GPIO_19");
        assert_eq!(board.pin_name(0).unwrap_err().kind(), ErrorKind::InvalidPin);
    }

    #[cfg(feature = "cv180")]
    #[test]
    fn duo_map_points_into_the_layout() {
        let layout = &crate::hw::cv180::LAYOUT;
        for &index in DUO_MAP.iter().filter(|&&index| index >= 0) {
            assert!((index as usize) < layout.len(), "{index}");
        }
    }

    #[cfg(feature = "th1520")]
    #[test]
    fn meles_map_points_into_the_layout() {
        let layout = &crate::hw::th1520::LAYOUT;
        for &index in MELES_MAP.iter().filter(|&&index| index >= 0) {
            assert!((index as usize) < layout.len(), "{index}");
        }
    }

    #[cfg(feature = "th1520")]
    #[test]
    fn meles_pin_15_lands_on_a_placeholder() {
        let board = meles(DriverConfig::default());

        assert!(board.valid_gpio(15));
        assert!(!crate::hw::th1520::LAYOUT[63].available);
        assert_eq!(board.pin_name(15).unwrap_err().kind(), ErrorKind::InvalidPin);
    }

    #[cfg(feature = "th1520")]
    #[test]
    fn meles_pins() {
        let board = meles(DriverConfig::default());
        assert!(board.valid_gpio(0));
        assert!(!board.valid_gpio(1));

        assert_eq!(board.pin_name(0).unwrap(), "GPIO0_17");
    }

    #[cfg(feature = "cv180")]
    #[test]
    fn setup_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = duo(DriverConfig::new(dir.path().join("mem"), dir.path()));

        let err = board.setup().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Setup);
        assert!(!board.soc().is_setup());
        assert!(matches!(
            board.pin_mode(1, PinMode::Output),
            Err(GpioError::NotSetup(_))
        ));
        assert_eq!(board.pin_name(1).unwrap(), "XGPIOA_28");
        board.gc().unwrap();
    }
}
