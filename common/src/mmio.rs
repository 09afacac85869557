//! Memory-mapped register access.
//!
//! A [`MemDevice`] is an open session on a raw memory device such as
//! `/dev/mem`. Each [`RegisterWindow`] maps a page-aligned run of physical
//! memory from that device and gives bounded, volatile access to the 32-bit
//! registers inside it.
//!
//! # Caller contract
//!
//! [`RegisterWindow::write_bits`] is a read-modify-write sequence. It is not
//! atomic with respect to another thread touching other bits of the same
//! register, and no locking is done here. Callers that share a bank across
//! threads must serialize access themselves.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

/// Width of every register in a window, in bytes.
pub const REGISTER_SIZE: usize = 4;

/// An open raw memory device.
#[derive(Debug)]
pub struct MemDevice {
    file: File,
    path: PathBuf,
}

impl MemDevice {
    /// Open `path` read/write with synchronous I/O.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)?;

        log::debug!("opened {} for raw memory access", path.display());

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path this device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map `len` bytes of physical memory starting at `phys`.
    ///
    /// `phys` must be a multiple of the system page size.
    pub fn map(&self, phys: u64, len: usize) -> io::Result<RegisterWindow> {
        RegisterWindow::map(&self.file, phys, len)
    }
}

/// A mapped run of device pages.
///
/// The mapping is released when the window is dropped.
#[derive(Debug)]
pub struct RegisterWindow {
    base: NonNull<u8>,
    len: usize,
    phys: u64,
}

// SAFETY: the window exclusively owns its mapping, so moving it to another
// thread is fine. It is deliberately not `Sync` (see the module docs).
unsafe impl Send for RegisterWindow {}

impl RegisterWindow {
    fn map(file: &File, phys: u64, len: usize) -> io::Result<Self> {
        if len == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "register window must not be empty",
            ));
        }

        let offset = libc::off_t::try_from(phys).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("physical address {phys:#x} does not fit in off_t"),
            )
        })?;

        // SAFETY: a fresh shared mapping of an open descriptor; the kernel
        // validates the length, offset alignment and protection.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                offset,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }

        let base = NonNull::new(addr.cast::<u8>())
            .ok_or_else(|| io::Error::other("mmap returned a null mapping"))?;

        log::debug!("mapped {len:#x} bytes at physical {phys:#x}");

        Ok(Self { base, len, phys })
    }

    /// Physical address of the first byte of the window.
    pub fn phys(&self) -> u64 {
        self.phys
    }

    /// Length of the window in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: [`MemDevice::map`] refuses zero-length windows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pointer to the register at `offset`, bounds and alignment checked.
    fn register(&self, offset: usize) -> io::Result<*mut u32> {
        let in_bounds = offset
            .checked_add(REGISTER_SIZE)
            .is_some_and(|end| end <= self.len);

        if offset % REGISTER_SIZE != 0 || !in_bounds {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "register offset {offset:#x} outside the {:#x}-byte window at {:#x}",
                    self.len, self.phys
                ),
            ));
        }

        // SAFETY: offset + 4 <= len and the base is page aligned.
        Ok(unsafe { self.base.as_ptr().add(offset).cast::<u32>() })
    }

    /// Read the full register at `offset`.
    pub fn read(&self, offset: usize) -> io::Result<u32> {
        let reg = self.register(offset)?;
        // SAFETY: `reg` points into our live mapping.
        Ok(unsafe { ptr::read_volatile(reg) })
    }

    /// Overwrite the full register at `offset`.
    pub fn write(&self, offset: usize, value: u32) -> io::Result<()> {
        let reg = self.register(offset)?;
        // SAFETY: `reg` points into our live mapping.
        unsafe { ptr::write_volatile(reg, value) };
        Ok(())
    }

    /// Extract the `width`-bit field starting at `bit`.
    pub fn read_bits(&self, offset: usize, bit: u32, width: u32) -> io::Result<u32> {
        let mask = field_mask(bit, width)?;
        Ok((self.read(offset)? & mask) >> bit)
    }

    /// Replace the `width`-bit field starting at `bit` with `value`.
    ///
    /// Bits of `value` above `width` are discarded. Every other bit of the
    /// register keeps the value read just before the write.
    pub fn write_bits(&self, offset: usize, bit: u32, width: u32, value: u32) -> io::Result<()> {
        let mask = field_mask(bit, width)?;
        let reg = self.register(offset)?;

        // SAFETY: `reg` points into our live mapping.
        unsafe {
            let current = ptr::read_volatile(reg);
            ptr::write_volatile(reg, (current & !mask) | ((value << bit) & mask));
        }

        Ok(())
    }
}

impl Drop for RegisterWindow {
    fn drop(&mut self) {
        // SAFETY: base/len are exactly what mmap returned and nothing can
        // reference the mapping once the window is gone.
        let rc = unsafe { libc::munmap(self.base.as_ptr().cast(), self.len) };
        if rc != 0 {
            log::warn!(
                "failed to unmap window at {:#x}: {}",
                self.phys,
                io::Error::last_os_error()
            );
        } else {
            log::debug!("unmapped window at {:#x}", self.phys);
        }
    }
}

/// Page size of the running system.
pub fn system_page_size() -> usize {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    usize::try_from(size).unwrap_or(4096)
}

fn field_mask(bit: u32, width: u32) -> io::Result<u32> {
    if width == 0 || bit.checked_add(width).is_none_or(|end| end > 32) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("bit field {bit}+{width} does not fit in a 32-bit register"),
        ));
    }

    Ok((u32::MAX >> (32 - width)) << bit)
}
