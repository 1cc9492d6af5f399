//! Heat transfer in the reactor, condenser and stripper.

/// Reactor cooling coil UA.
///
/// Scales with the wetted coil area (linear in level between 10 and 50 % of
/// the coil band) and with agitator speed `agitator` (XMV(12) mapped to
/// `(pos + 150) / 100`).
pub fn reactor_ua(liquid_volume: f64, agitator: f64) -> f64 {
    let level = liquid_volume / 7.8;
    let wetted = if level > 50.0 {
        1.0
    } else if level < 10.0 {
        0.0
    } else {
        liquid_volume * 0.025 / 7.8 - 0.25
    };
    wetted * (-0.5 * agitator * agitator + 2.75 * agitator - 2.5) * 0.85549
}

/// Condenser UA as a function of effluent flow.
pub fn condenser_ua(effluent_flow: f64) -> f64 {
    let r = effluent_flow / 3528.73;
    let r2 = r * r;
    (1.0 - 1.0 / (r2 * r2 + 1.0)) * 0.404655
}

/// Steam heat to the stripper; none once the stripper reaches 100 deg C.
pub fn stripper_steam_duty(steam_ua: f64, stripper_temp: f64) -> f64 {
    if stripper_temp < 100.0 {
        steam_ua * (100.0 - stripper_temp)
    } else {
        0.0
    }
}

/// Cooling water outlet temperature balance.
///
/// `flow` is the water flow, `inlet` and `outlet` temperatures in deg C,
/// `duty` the heat delivered to the process side (negative when cooling)
/// and `capacity` the jacket holdup constant.
pub fn cooling_water_rate(flow: f64, inlet: f64, outlet: f64, duty: f64, capacity: f64) -> f64 {
    (flow * 500.53 * (inlet - outlet) - duty * 1e6 / 1.8) / capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_coil_has_no_ua() {
        assert_eq!(reactor_ua(50.0, 1.0), 0.0);
    }

    #[test]
    fn reactor_ua_is_parabolic_in_agitator() {
        let v = 600.0;
        assert!((reactor_ua(v, 2.0) - 0.85549).abs() < 1e-12);
        assert!(reactor_ua(v, 2.75) > reactor_ua(v, 2.0));
        assert!((reactor_ua(v, 2.0) - reactor_ua(v, 3.5)).abs() < 1e-12);
    }

    #[test]
    fn condenser_ua_saturates() {
        assert!(condenser_ua(0.0).abs() < 1e-15);
        assert!((condenser_ua(1e6) - 0.404655).abs() < 1e-9);
    }

    #[test]
    fn steam_duty_stops_at_boiling() {
        assert_eq!(stripper_steam_duty(0.01, 120.0), 0.0);
        assert!((stripper_steam_duty(0.01, 60.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn water_settles_when_balanced() {
        let duty = 100.0 * 500.53 * 5.0 * 1.8 / 1e6;
        assert!(cooling_water_rate(100.0, 35.0, 40.0, -duty, 7060.0).abs() < 1e-9);
    }
}
