//! Low-level Linux plumbing for user-space GPIO drivers.
//!
//! # Module Organization
//!
//! - [`mmio`]: Memory device sessions and typed register windows
//! - [`sysfs`]: Kernel GPIO export, edge configuration and value polling
//!
//! Nothing in here knows about a particular SoC. Chip drivers in the
//! `drivers` crate combine these primitives with their register layout.

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        pub mod mmio;
        pub mod sysfs;
    } else {
        compile_error!(
            "Unsupported operating system!\n\
            GPIO access needs a /dev/mem device and the sysfs GPIO interface."
        );
    }
}
