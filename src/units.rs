//! Power and rate conversions used by the summary line and the charts.

/// Convert log dBm values to linear mW.
pub fn dbm_to_mw(dbm: f64) -> f64 {
    let exponent = dbm / 10.0;
    // Whole decades go through powi so that e.g. -80 dBm is exactly 1e-8 mW.
    if exponent.fract() == 0.0 && exponent.abs() <= 300.0 {
        10f64.powi(exponent as i32)
    } else {
        10f64.powf(exponent)
    }
}

/// Convert dBm to a pW, nW, uW or mW string with two decimals.
pub fn dbm_to_units(dbm: f64) -> String {
    let mw = dbm_to_mw(dbm);

    if mw < 1e-8 {
        format!("{:.2} pW", mw * 1e9)
    } else if mw < 1e-5 {
        format!("{:.2} nW", mw * 1e6)
    } else if mw < 1e-2 {
        format!("{:.2} uW", mw * 1e3)
    } else {
        format!("{:.2} mW", mw)
    }
}

/// Absolute power measurement in dBm (IW_QUAL_DBM): map into -192 .. 63 range.
pub fn u8_to_dbm(power: u8) -> i32 {
    let power = i32::from(power);
    if power > 63 {
        power - 0x100
    } else {
        power
    }
}

/// Scale `value` from the `0..=max` range into `0..=height`.
pub fn level_to_height(value: f64, max: f64, height: f64) -> f64 {
    height / max * value
}

/// Format a bitrate in bits per second, e.g. `54 Mb/s`.
pub fn format_bitrate(bits: u64) -> String {
    let bits = bits as f64;
    let (value, unit) = if bits >= 1e9 {
        (bits / 1e9, "Gb/s")
    } else if bits >= 1e6 {
        (bits / 1e6, "Mb/s")
    } else if bits >= 1e3 {
        (bits / 1e3, "kb/s")
    } else {
        (bits, "b/s")
    };
    format!("{} {}", trim_decimals(value), unit)
}

/// Format a frequency in Hz, e.g. `2.412 GHz`.
pub fn format_frequency(hz: f64) -> String {
    let (value, unit) = if hz >= 1e9 {
        (hz / 1e9, "GHz")
    } else if hz >= 1e6 {
        (hz / 1e6, "MHz")
    } else if hz >= 1e3 {
        (hz / 1e3, "kHz")
    } else {
        (hz, "Hz")
    };
    format!("{} {}", trim_decimals(value), unit)
}

fn trim_decimals(value: f64) -> String {
    let s = format!("{:.3}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mw_is_positive_and_increasing() {
        let mut prev = 0.0;
        let mut dbm = -200.0;
        while dbm <= 60.0 {
            let mw = dbm_to_mw(dbm);
            assert!(mw > 0.0, "{dbm} dBm gave {mw}");
            assert!(mw > prev, "not increasing at {dbm} dBm");
            prev = mw;
            dbm += 0.25;
        }
    }

    #[test]
    fn whole_decades_are_exact() {
        assert_eq!(dbm_to_mw(0.0), 1.0);
        assert_eq!(dbm_to_mw(-80.0), 1e-8);
        assert_eq!(dbm_to_mw(20.0), 100.0);
    }

    #[test]
    fn unit_tiers() {
        assert_eq!(dbm_to_units(0.0), "1.00 mW");
        assert_eq!(dbm_to_units(-30.0), "1.00 uW");
        assert_eq!(dbm_to_units(-60.0), "1.00 nW");
        assert_eq!(dbm_to_units(-100.0), "0.10 pW");
    }

    #[test]
    fn threshold_falls_into_higher_unit() {
        // 1e-8 mW is not below the picowatt threshold
        assert_eq!(dbm_to_units(-80.0), "0.01 nW");
        assert_eq!(dbm_to_units(-50.0), "0.01 uW");
        assert_eq!(dbm_to_units(-20.0), "0.01 mW");
    }

    #[test]
    fn u8_wraps_above_63() {
        assert_eq!(u8_to_dbm(0), 0);
        assert_eq!(u8_to_dbm(63), 63);
        assert_eq!(u8_to_dbm(64), -192);
        assert_eq!(u8_to_dbm(255), -1);
        assert_eq!(u8_to_dbm(211), -45);
    }

    #[test]
    fn level_to_height_scales_linearly() {
        assert_eq!(level_to_height(35.0, 70.0, 100.0), 50.0);
        assert_eq!(level_to_height(0.0, 70.0, 101.0), 0.0);
    }

    #[test]
    fn formats_rates_and_frequencies() {
        assert_eq!(format_bitrate(54_000_000), "54 Mb/s");
        assert_eq!(format_bitrate(72_200_000), "72.2 Mb/s");
        assert_eq!(format_bitrate(1_500_000_000), "1.5 Gb/s");
        assert_eq!(format_bitrate(500_000), "500 kb/s");
        assert_eq!(format_bitrate(12), "12 b/s");
        assert_eq!(format_frequency(2.412e9), "2.412 GHz");
        assert_eq!(format_frequency(5.18e9), "5.18 GHz");
    }
}
