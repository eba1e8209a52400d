//! Parser for `/proc/net/wireless`.
//!
//! ```text
//! Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
//!  face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
//!  wlan0: 0000   70.  -40.  -256        0      0      0      0      0        0
//! ```

use crate::error::{RssiError, RssiResult};
use crate::wireless::types::LinkStats;

pub const PROC_NET_WIRELESS: &str = "/proc/net/wireless";

/// Find `interface` in the table and return its quality columns.
///
/// `Ok(None)` means the interface is not listed, which is how a removed or
/// non-wireless interface shows up.
pub fn parse_link_stats(table: &str, interface: &str) -> RssiResult<Option<LinkStats>> {
    for line in table.lines().skip(2) {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        if name.trim() != interface {
            continue;
        }

        let fields: Vec<&str> = rest.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(RssiError::Parse(format!(
                "short /proc/net/wireless line for {}: {:?}",
                interface, line
            )));
        }

        let quality = parse_value(fields[1])?;
        let level = parse_value(fields[2])?;
        let noise = parse_value(fields[3])?;

        return Ok(Some(LinkStats {
            quality,
            signal_level: raw_byte(level) as u8,
            noise_level: raw_byte(noise),
        }));
    }
    Ok(None)
}

/// Interface names listed in the table.
pub fn parse_interfaces(table: &str) -> Vec<String> {
    table
        .lines()
        .skip(2)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Columns carry a trailing '.' when the driver marked them as updated.
fn parse_value(field: &str) -> RssiResult<i32> {
    let trimmed = field.trim_end_matches('.');
    trimmed
        .parse::<f64>()
        .map(|v| v as i32)
        .map_err(|e| RssiError::Parse(format!("{:?}: {}", field, e)))
}

/// The kernel prints dBm levels signed; the charts work on the raw byte.
fn raw_byte(value: i32) -> i32 {
    value.rem_euclid(256)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
 wlan0: 0000   70.  -40.  -256        0      0      0      0      0        0
wlp3s0: 0000   42   195    0          0      0      3      0      1        0
";

    #[test]
    fn parses_signed_dbm_line() {
        let stats = parse_link_stats(TABLE, "wlan0").unwrap().unwrap();
        assert_eq!(
            stats,
            LinkStats {
                quality: 70,
                signal_level: 216,
                noise_level: 0,
            }
        );
    }

    #[test]
    fn parses_raw_line() {
        let stats = parse_link_stats(TABLE, "wlp3s0").unwrap().unwrap();
        assert_eq!(stats.quality, 42);
        assert_eq!(stats.signal_level, 195);
        assert_eq!(stats.noise_level, 0);
    }

    #[test]
    fn missing_interface_is_none() {
        assert_eq!(parse_link_stats(TABLE, "wlan1").unwrap(), None);
    }

    #[test]
    fn short_line_is_parse_error() {
        let table = "h1\nh2\n wlan0: 0000 70.\n";
        assert!(matches!(
            parse_link_stats(table, "wlan0"),
            Err(RssiError::Parse(_))
        ));
    }

    #[test]
    fn lists_interfaces() {
        assert_eq!(parse_interfaces(TABLE), vec!["wlan0", "wlp3s0"]);
    }
}
