//! Runtime configuration for SoC drivers.

use std::path::PathBuf;

/// Default raw memory device.
pub const DEFAULT_MEM_DEVICE: &str = "/dev/mem";

/// Default sysfs mount point.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys";

/// Where a driver finds the kernel interfaces it talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Device mapped for register access.
    pub mem_device: PathBuf,
    /// Root of the sysfs tree holding `class/gpio`.
    pub sysfs_root: PathBuf,
}

impl DriverConfig {
    pub fn new(mem_device: impl Into<PathBuf>, sysfs_root: impl Into<PathBuf>) -> Self {
        Self {
            mem_device: mem_device.into(),
            sysfs_root: sysfs_root.into(),
        }
    }

    /// `<sysfs_root>/class/gpio`, home of `export`, `unexport` and the
    /// per-line directories.
    pub fn gpio_class_dir(&self) -> PathBuf {
        self.sysfs_root.join("class").join("gpio")
    }

    /// `<sysfs_root>/class/gpio/gpio<line>`.
    pub fn class_line_dir(&self, line: u32) -> PathBuf {
        self.gpio_class_dir().join(format!("gpio{line}"))
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MEM_DEVICE, DEFAULT_SYSFS_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_paths() {
        let config = DriverConfig::default();
        assert_eq!(config.mem_device, Path::new("/dev/mem"));
        assert_eq!(config.class_line_dir(508), Path::new("/sys/class/gpio/gpio508"));
    }

    #[test]
    fn custom_root() {
        let config = DriverConfig::new("/tmp/mem", "/tmp/sys");
        assert_eq!(config.gpio_class_dir(), Path::new("/tmp/sys/class/gpio"));
    }
}
