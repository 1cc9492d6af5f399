//! Measurement and input catalogue.

use std::ops::Range;

use crate::plant::layout::{N_INPUTS, N_MEASUREMENTS};

/// Continuously measured variables XMEAS(1..22).
pub const CONTINUOUS: Range<usize> = 0..22;
/// Reactor feed analyzer, XMEAS(23..28): A..F in stream 7.
pub const FEED_ANALYZER: Range<usize> = 22..28;
/// Purge gas analyzer, XMEAS(29..36): A..H in stream 10.
pub const PURGE_ANALYZER: Range<usize> = 28..36;
/// Product analyzer, XMEAS(37..41): D..H in stream 13.
pub const PRODUCT_ANALYZER: Range<usize> = 36..41;

/// Feed and purge analyzers scan every 6 minutes.
pub const GAS_ANALYZER_PERIOD: f64 = 0.1;
/// Product analyzer scans every 15 minutes.
pub const PRODUCT_ANALYZER_PERIOD: f64 = 0.25;

pub const MEASUREMENT_NAMES: [&str; N_MEASUREMENTS] = [
    "A feed (kscmh)",
    "D feed (kg/h)",
    "E feed (kg/h)",
    "A and C feed (kscmh)",
    "Recycle flow (kscmh)",
    "Reactor feed rate (kscmh)",
    "Reactor pressure (kPa gauge)",
    "Reactor level (%)",
    "Reactor temperature (deg C)",
    "Purge rate (kscmh)",
    "Separator temperature (deg C)",
    "Separator level (%)",
    "Separator pressure (kPa gauge)",
    "Separator underflow (m3/h)",
    "Stripper level (%)",
    "Stripper pressure (kPa gauge)",
    "Stripper underflow (m3/h)",
    "Stripper temperature (deg C)",
    "Stripper steam flow (kg/h)",
    "Compressor work (kW)",
    "Reactor cooling water outlet temperature (deg C)",
    "Condenser cooling water outlet temperature (deg C)",
    "Reactor feed A (mol%)",
    "Reactor feed B (mol%)",
    "Reactor feed C (mol%)",
    "Reactor feed D (mol%)",
    "Reactor feed E (mol%)",
    "Reactor feed F (mol%)",
    "Purge A (mol%)",
    "Purge B (mol%)",
    "Purge C (mol%)",
    "Purge D (mol%)",
    "Purge E (mol%)",
    "Purge F (mol%)",
    "Purge G (mol%)",
    "Purge H (mol%)",
    "Product D (mol%)",
    "Product E (mol%)",
    "Product F (mol%)",
    "Product G (mol%)",
    "Product H (mol%)",
];

pub const INPUT_NAMES: [&str; N_INPUTS] = [
    "D feed flow (%)",
    "E feed flow (%)",
    "A feed flow (%)",
    "A and C feed flow (%)",
    "Compressor recycle valve (%)",
    "Purge valve (%)",
    "Separator pot liquid flow (%)",
    "Stripper liquid product flow (%)",
    "Stripper steam valve (%)",
    "Reactor cooling water flow (%)",
    "Condenser cooling water flow (%)",
    "Agitator speed (%)",
];

/// Standard deviation of the noise added to each measurement.
pub const NOISE_STD: [f64; N_MEASUREMENTS] = [
    0.0012, 18.0, 22.0, 0.05, 0.2, 0.21, 0.3, 0.5, 0.01, 0.0017, 0.01, 1.0, 0.3, 0.125, 1.0, 0.3,
    0.115, 0.01, 1.15, 0.2, 0.01, 0.01, 0.25, 0.1, 0.25, 0.1, 0.25, 0.025, 0.25, 0.1, 0.25, 0.1,
    0.25, 0.025, 0.05, 0.05, 0.01, 0.01, 0.01, 0.5, 0.5,
];

/// Column key for XMEAS(n), n 1-based.
pub fn measurement_key(index: usize) -> String {
    format!("xmeas_{}", index + 1)
}

/// Column key for XMV(n), n 1-based.
pub fn input_key(index: usize) -> String {
    format!("xmv_{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_blocks_cover_the_tail() {
        assert_eq!(CONTINUOUS.end, FEED_ANALYZER.start);
        assert_eq!(FEED_ANALYZER.end, PURGE_ANALYZER.start);
        assert_eq!(PURGE_ANALYZER.end, PRODUCT_ANALYZER.start);
        assert_eq!(PRODUCT_ANALYZER.end, N_MEASUREMENTS);
    }

    #[test]
    fn keys_are_one_based() {
        assert_eq!(measurement_key(0), "xmeas_1");
        assert_eq!(input_key(11), "xmv_12");
    }

    #[test]
    fn noise_is_non_negative() {
        assert!(NOISE_STD.iter().all(|s| *s >= 0.0));
    }
}
