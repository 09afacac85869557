//! Sysfs GPIO primitives.
//!
//! The kernel exposes each exported GPIO line as a directory of attribute
//! files (`direction`, `edge`, `value`). Lines are requested by writing
//! their number to `export` and released through `unexport`. Once an edge
//! is configured, the `value` file signals `POLLPRI` whenever that edge
//! occurs.
//!
//! These helpers only deal with paths and descriptors. Working out which
//! directory belongs to which pin is up to the chip driver.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::fd::AsRawFd;
use std::path::Path;

/// Outcome of a [`wait_for_edge`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Wake {
    /// The descriptor reported an event.
    Edge,
    /// The timeout elapsed, or a signal interrupted the wait.
    Timeout,
}

/// Whether a line directory such as `/sys/class/gpio/gpio42` exists.
pub fn is_exported(line_dir: &Path) -> bool {
    line_dir.exists()
}

/// Replace the contents of an existing attribute file with `value`.
pub fn write_attr(path: &Path, value: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    file.write_all(value.as_bytes())
}

/// Ask the kernel to export `line` through `<class_dir>/export`.
pub fn export(class_dir: &Path, line: u32) -> io::Result<()> {
    write_attr(&class_dir.join("export"), &line.to_string())?;
    log::debug!("exported gpio{line}");
    Ok(())
}

/// Release `line` through `<class_dir>/unexport`.
pub fn unexport(class_dir: &Path, line: u32) -> io::Result<()> {
    write_attr(&class_dir.join("unexport"), &line.to_string())?;
    log::debug!("unexported gpio{line}");
    Ok(())
}

/// Open a `value` attribute for polling.
///
/// Whatever is pending on the file is read and discarded, then the file is
/// rewound, so the first wait only reports edges that happen afterwards.
pub fn open_value(path: &Path) -> io::Result<File> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;

    let mut pending = Vec::new();
    file.read_to_end(&mut pending)?;
    file.seek(SeekFrom::Start(0))?;

    Ok(file)
}

/// Block until `value` signals an edge or `timeout_ms` elapses.
///
/// A timeout of `0` polls once, a negative timeout waits forever. After the
/// wait the file is rewound and one byte is read to re-arm the event.
pub fn wait_for_edge(value: &File, timeout_ms: i32) -> io::Result<Wake> {
    let mut fds = libc::pollfd {
        fd: value.as_raw_fd(),
        events: libc::POLLPRI | libc::POLLERR,
        revents: 0,
    };

    // SAFETY: one valid pollfd for the duration of the call.
    let rc = unsafe { libc::poll(&mut fds, 1, timeout_ms) };

    let wake = match rc {
        0 => Wake::Timeout,
        rc if rc < 0 => {
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
            Wake::Timeout
        }
        _ if fds.revents & libc::POLLNVAL != 0 => {
            return Err(io::Error::from_raw_os_error(libc::EBADF));
        }
        _ => Wake::Edge,
    };

    if let Err(err) = rearm(value) {
        log::warn!("failed to re-arm gpio value descriptor {}: {err}", fds.fd);
    }

    Ok(wake)
}

fn rearm(mut value: &File) -> io::Result<()> {
    value.seek(SeekFrom::Start(0))?;
    let mut byte = [0u8; 1];
    let _read = value.read(&mut byte)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::fd::{FromRawFd, OwnedFd};
    use tempfile::tempdir;

    #[test]
    fn export_writes_the_line_number() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("export"), "").unwrap();
        fs::write(dir.path().join("unexport"), "").unwrap();

        export(dir.path(), 508).unwrap();
        unexport(dir.path(), 17).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("export")).unwrap(), "508");
        assert_eq!(fs::read_to_string(dir.path().join("unexport")).unwrap(), "17");
    }

    #[test]
    fn write_attr_does_not_create_files() {
        let dir = tempdir().unwrap();
        let edge = dir.path().join("edge");

        assert!(write_attr(&edge, "rising").is_err());
        assert!(!edge.exists());
    }

    #[test]
    fn write_attr_replaces_longer_contents() {
        let dir = tempdir().unwrap();
        let direction = dir.path().join("direction");
        fs::write(&direction, "out").unwrap();

        write_attr(&direction, "in").unwrap();
        assert_eq!(fs::read_to_string(&direction).unwrap(), "in");
    }

    #[test]
    fn is_exported_checks_the_line_directory() {
        let dir = tempdir().unwrap();
        let line = dir.path().join("gpio3");

        assert!(!is_exported(&line));
        fs::create_dir(&line).unwrap();
        assert!(is_exported(&line));
    }

    #[test]
    fn open_value_starts_at_the_beginning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("value");
        fs::write(&path, "1\n").unwrap();

        let mut file = open_value(&path).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "1\n");
    }

    #[test]
    fn regular_file_never_signals_an_edge() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("value");
        fs::write(&path, "0\n").unwrap();

        let file = open_value(&path).unwrap();
        assert_eq!(wait_for_edge(&file, 0).unwrap(), Wake::Timeout);
        assert_eq!(wait_for_edge(&file, 10).unwrap(), Wake::Timeout);
    }

    #[test]
    fn hung_up_descriptor_wakes_immediately() {
        let mut fds = [0; 2];
        // SAFETY: `fds` has room for both ends.
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

        // SAFETY: both descriptors were just created and are owned here.
        let reader = File::from(unsafe { OwnedFd::from_raw_fd(fds[0]) });
        drop(unsafe { OwnedFd::from_raw_fd(fds[1]) });

        assert_eq!(wait_for_edge(&reader, 1000).unwrap(), Wake::Edge);
    }
}
