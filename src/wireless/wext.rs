//! Wireless-extension ioctls (`linux/wireless.h`).

use std::ffi::c_void;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

const SIOCGIWNAME: u32 = 0x8B01;
const SIOCGIWFREQ: u32 = 0x8B05;
const SIOCGIWESSID: u32 = 0x8B1B;
const SIOCGIWRATE: u32 = 0x8B21;

const IW_ESSID_MAX_SIZE: usize = 32;

#[repr(C)]
#[derive(Clone, Copy)]
struct IwPoint {
    pointer: *mut c_void,
    length: u16,
    flags: u16,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct IwFreq {
    m: i32,
    e: i16,
    i: u8,
    flags: u8,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct IwParam {
    value: i32,
    fixed: u8,
    disabled: u8,
    flags: u16,
}

#[repr(C)]
#[derive(Clone, Copy)]
union IwReqData {
    name: [libc::c_char; libc::IFNAMSIZ],
    essid: IwPoint,
    freq: IwFreq,
    bitrate: IwParam,
}

#[repr(C)]
struct IwReq {
    ifr_name: [libc::c_char; libc::IFNAMSIZ],
    u: IwReqData,
}

/// Frequency as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WextFrequency {
    Hz(f64),
    /// Drivers may report a channel number instead of a frequency
    Channel(u32),
}

/// A datagram socket used only as an ioctl handle.
pub struct WextSocket {
    fd: OwnedFd,
}

impl WextSocket {
    pub fn open() -> io::Result<Self> {
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // fd is a freshly created descriptor that nothing else owns
        Ok(Self {
            fd: unsafe { OwnedFd::from_raw_fd(fd) },
        })
    }

    /// Protocol name, e.g. "IEEE 802.11".
    pub fn name(&self, interface: &str) -> io::Result<String> {
        let data = self.request(interface, SIOCGIWNAME, zeroed_data())?;
        let name = unsafe { data.name };
        Ok(c_chars_to_string(&name))
    }

    pub fn essid(&self, interface: &str) -> io::Result<String> {
        let mut buf = [0u8; IW_ESSID_MAX_SIZE + 1];
        let mut data = zeroed_data();
        data.essid = IwPoint {
            pointer: buf.as_mut_ptr().cast(),
            length: buf.len() as u16,
            flags: 0,
        };
        let data = self.request(interface, SIOCGIWESSID, data)?;
        let len = usize::from(unsafe { data.essid.length }).min(IW_ESSID_MAX_SIZE);
        let essid = &buf[..len];
        let end = essid.iter().position(|&b| b == 0).unwrap_or(essid.len());
        Ok(String::from_utf8_lossy(&essid[..end]).into_owned())
    }

    pub fn frequency(&self, interface: &str) -> io::Result<WextFrequency> {
        let data = self.request(interface, SIOCGIWFREQ, zeroed_data())?;
        let freq = unsafe { data.freq };
        if freq.e == 0 && (0..1000).contains(&freq.m) {
            return Ok(WextFrequency::Channel(freq.m as u32));
        }
        Ok(WextFrequency::Hz(
            f64::from(freq.m) * 10f64.powi(i32::from(freq.e)),
        ))
    }

    /// Bits per second.
    pub fn bitrate(&self, interface: &str) -> io::Result<u64> {
        let data = self.request(interface, SIOCGIWRATE, zeroed_data())?;
        let rate = unsafe { data.bitrate };
        Ok(u64::try_from(rate.value).unwrap_or(0))
    }

    fn request(&self, interface: &str, cmd: u32, data: IwReqData) -> io::Result<IwReqData> {
        let mut req = IwReq {
            ifr_name: ifname(interface)?,
            u: data,
        };
        let rc = unsafe { libc::ioctl(self.fd.as_raw_fd(), cmd as _, &mut req as *mut IwReq) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(req.u)
    }
}

fn zeroed_data() -> IwReqData {
    // all-zero is a valid value for every variant (null pointer, zero lengths)
    unsafe { std::mem::zeroed() }
}

fn ifname(interface: &str) -> io::Result<[libc::c_char; libc::IFNAMSIZ]> {
    let bytes = interface.as_bytes();
    if bytes.is_empty() || bytes.len() >= libc::IFNAMSIZ || bytes.contains(&0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid interface name {:?}", interface),
        ));
    }
    let mut name = [0 as libc::c_char; libc::IFNAMSIZ];
    for (dst, &src) in name.iter_mut().zip(bytes) {
        *dst = src as libc::c_char;
    }
    Ok(name)
}

fn c_chars_to_string(chars: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_matches_kernel_layout() {
        assert_eq!(std::mem::size_of::<IwReqData>(), 16);
        assert_eq!(std::mem::size_of::<IwReq>(), 32);
    }

    #[test]
    fn rejects_bad_interface_names() {
        assert!(ifname("").is_err());
        assert!(ifname("a-very-long-interface").is_err());
        assert!(ifname("wlan0").is_ok());
    }

    #[test]
    fn c_string_stops_at_nul() {
        let mut raw = [0 as libc::c_char; 8];
        for (dst, &src) in raw.iter_mut().zip(b"IEEE") {
            *dst = src as libc::c_char;
        }
        assert_eq!(c_chars_to_string(&raw), "IEEE");
    }
}
