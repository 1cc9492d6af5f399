//! State vector layout and nominal operating point.

use std::ops::Range;

use te_thermo::NC;

/// Continuous states.
pub const N_STATES: usize = 50;
/// Manipulated variables XMV(1..12).
pub const N_INPUTS: usize = 12;
/// Measured variables XMEAS(1..41).
pub const N_MEASUREMENTS: usize = 41;

/// Reactor vapor holdup of A, B, C (kmol).
pub const REACTOR_VAPOR: Range<usize> = 0..3;
/// Reactor liquid holdup of D..H (kmol).
pub const REACTOR_LIQUID: Range<usize> = 3..8;
pub const REACTOR_ENERGY: usize = 8;
pub const SEPARATOR_VAPOR: Range<usize> = 9..12;
pub const SEPARATOR_LIQUID: Range<usize> = 12..17;
pub const SEPARATOR_ENERGY: usize = 17;
/// Stripper liquid holdup of A..H.
pub const STRIPPER_LIQUID: Range<usize> = 18..26;
pub const STRIPPER_ENERGY: usize = 26;
/// Compressor header vapor holdup of A..H.
pub const HEADER_VAPOR: Range<usize> = 27..35;
pub const HEADER_ENERGY: usize = 35;
/// Reactor cooling water outlet temperature (deg C).
pub const REACTOR_CW_OUTLET: usize = 36;
/// Condenser cooling water outlet temperature (deg C).
pub const CONDENSER_CW_OUTLET: usize = 37;
/// Filtered valve positions (% open).
pub const VALVES: Range<usize> = 38..50;

/// Liquid holdups of the reactor or separator: A..C are treated as
/// insoluble, so only D..H come from the state.
pub fn heavy_liquid(y: &[f64], liquid: Range<usize>) -> [f64; NC] {
    let mut out = [0.0; NC];
    for (o, v) in out[3..].iter_mut().zip(&y[liquid]) {
        *o = *v;
    }
    out
}

/// Eight component holdups from a contiguous range.
pub fn holdups(y: &[f64], range: Range<usize>) -> [f64; NC] {
    let mut out = [0.0; NC];
    out.copy_from_slice(&y[range]);
    out
}

/// Steady operating point at the base case.
pub const NOMINAL_STATE: [f64; N_STATES] = [
    10.40491389,
    4.363996017,
    7.570059737,
    0.4230042431,
    24.15513437,
    2.942597645,
    154.3770655,
    159.186596,
    2.808522723,
    63.75581199,
    26.74026066,
    46.38532432,
    0.2464521543,
    15.20484404,
    1.852266172,
    52.44639459,
    41.20394008,
    0.569931776,
    0.4306056376,
    0.0079906200783,
    0.9056036089,
    0.016054258216,
    0.7509759687,
    0.088582855955,
    48.27726193,
    39.38459028,
    0.3755297257,
    107.7562698,
    29.77250546,
    88.32481135,
    23.03929507,
    62.85848794,
    5.546318688,
    11.92244772,
    5.555448243,
    0.9218489762,
    94.59927549,
    77.29698353,
    63.05263039,
    53.97970677,
    24.64355755,
    61.30192144,
    22.21,
    40.06374673,
    38.1003437,
    46.53415582,
    47.44573456,
    41.10581288,
    18.11349055,
    50.0,
];

/// Valve positions of a state vector, usable as constant commands.
pub fn valve_positions(y: &[f64; N_STATES]) -> [f64; N_INPUTS] {
    let mut u = [0.0; N_INPUTS];
    u.copy_from_slice(&y[VALVES]);
    u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_tile_the_state() {
        let ranges = [
            REACTOR_VAPOR,
            REACTOR_LIQUID,
            REACTOR_ENERGY..REACTOR_ENERGY + 1,
            SEPARATOR_VAPOR,
            SEPARATOR_LIQUID,
            SEPARATOR_ENERGY..SEPARATOR_ENERGY + 1,
            STRIPPER_LIQUID,
            STRIPPER_ENERGY..STRIPPER_ENERGY + 1,
            HEADER_VAPOR,
            HEADER_ENERGY..HEADER_ENERGY + 1,
            REACTOR_CW_OUTLET..REACTOR_CW_OUTLET + 1,
            CONDENSER_CW_OUTLET..CONDENSER_CW_OUTLET + 1,
            VALVES,
        ];
        let mut next = 0;
        for r in ranges {
            assert_eq!(r.start, next);
            next = r.end;
        }
        assert_eq!(next, N_STATES);
    }

    #[test]
    fn heavy_liquid_has_no_lights() {
        let h = heavy_liquid(&NOMINAL_STATE, REACTOR_LIQUID);
        assert_eq!(&h[..3], &[0.0; 3]);
        assert_eq!(h[3], NOMINAL_STATE[3]);
        assert_eq!(h[7], NOMINAL_STATE[7]);
    }

    #[test]
    fn nominal_valves() {
        let u = valve_positions(&NOMINAL_STATE);
        assert_eq!(u[0], 63.05263039);
        assert_eq!(u[11], 50.0);
    }
}
