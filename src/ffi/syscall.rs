use std::fs::File;
use std::io::Result;

use super::Attr;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod imp {
    use std::fs::File;
    use std::io::{Error, Result};
    use std::os::fd::{AsRawFd, FromRawFd};

    use super::Attr;

    pub fn perf_event_open(
        attr: &Attr,
        pid: i32,
        cpu: i32,
        group_fd: i32,
        flags: u64,
    ) -> Result<File> {
        let num = libc::SYS_perf_event_open;
        let fd = unsafe { libc::syscall(num, attr as *const Attr, pid, cpu, group_fd, flags) };
        if fd != -1 {
            Ok(unsafe { File::from_raw_fd(fd as _) })
        } else {
            Err(Error::last_os_error())
        }
    }

    pub fn ioctl_arg(file: &File, op: u64, arg: u64) -> Result<i32> {
        let fd = file.as_raw_fd();
        let result = unsafe { libc::ioctl(fd, op as _, arg) };
        if result != -1 {
            Ok(result)
        } else {
            Err(Error::last_os_error())
        }
    }

    pub fn read(file: &File, buf: &mut [u8]) -> Result<usize> {
        let fd = file.as_raw_fd();
        let count = buf.len();
        let buf = buf.as_mut_ptr() as _;
        let bytes = unsafe { libc::read(fd, buf, count) };
        if bytes != -1 {
            Ok(bytes as _)
        } else {
            Err(Error::last_os_error())
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
mod imp {
    use std::fs::File;
    use std::io::{Error, ErrorKind, Result};

    use super::Attr;

    pub fn perf_event_open(_: &Attr, _: i32, _: i32, _: i32, _: u64) -> Result<File> {
        Err(Error::from(ErrorKind::Unsupported))
    }

    pub fn ioctl_arg(_: &File, _: u64, _: u64) -> Result<i32> {
        Err(Error::from(ErrorKind::Unsupported))
    }

    pub fn read(_: &File, _: &mut [u8]) -> Result<usize> {
        Err(Error::from(ErrorKind::Unsupported))
    }
}

pub fn perf_event_open(attr: &Attr, pid: i32, cpu: i32, group_fd: i32, flags: u64) -> Result<File> {
    imp::perf_event_open(attr, pid, cpu, group_fd, flags)
}

pub fn ioctl_arg(file: &File, op: u64, arg: u64) -> Result<i32> {
    imp::ioctl_arg(file, op, arg)
}

pub fn read(file: &File, buf: &mut [u8]) -> Result<usize> {
    imp::read(file, buf)
}
