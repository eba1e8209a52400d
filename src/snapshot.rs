//! The scan snapshot file shared by `wifirssi-scan` and `wifirssi-map`.
//!
//! The file is a JSON array of access points, in scan order:
//!
//! ```json
//! [
//!   { "essid": "home", "frequency_hz": 2412000000.0, "signal_level": 211 }
//! ]
//! ```
//!
//! `signal_level` is the raw byte form of the level (see
//! [`u8_to_dbm`](crate::units::u8_to_dbm)).

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::RssiResult;
use crate::wireless::AccessPoint;

/// Write `access_points` to `path`, replacing any previous snapshot.
pub fn save(path: &Path, access_points: &[AccessPoint]) -> RssiResult<()> {
    let json = serde_json::to_string_pretty(access_points)?;
    fs::write(path, json)?;
    info!(
        "Wrote {} access points to {}",
        access_points.len(),
        path.display()
    );
    Ok(())
}

pub fn load(path: &Path) -> RssiResult<Vec<AccessPoint>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
