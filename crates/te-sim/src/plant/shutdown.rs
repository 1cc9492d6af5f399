//! Safety interlocks.

use std::fmt;

use te_core::FT3_PER_M3;

/// Reason the plant shut itself down, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripCode {
    HighReactorPressure = 1,
    HighReactorLevel = 2,
    LowReactorLevel = 3,
    HighReactorTemperature = 4,
    HighSeparatorLevel = 5,
    LowSeparatorLevel = 6,
    HighStripperLevel = 7,
    LowStripperLevel = 8,
}

impl TripCode {
    /// Numeric shutdown code (1..=8).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn message(self) -> &'static str {
        match self {
            TripCode::HighReactorPressure => "High Reactor Pressure!!  Shutting down.",
            TripCode::HighReactorLevel => "High Reactor Liquid Level!!  Shutting down.",
            TripCode::LowReactorLevel => "Low Reactor Liquid Level!!  Shutting down.",
            TripCode::HighReactorTemperature => "High Reactor Temperature!!  Shutting down.",
            TripCode::HighSeparatorLevel => "High Separator Liquid Level!!  Shutting down.",
            TripCode::LowSeparatorLevel => "Low Separator Liquid Level!!  Shutting down.",
            TripCode::HighStripperLevel => "High Stripper Liquid Level!!  Shutting down.",
            TripCode::LowStripperLevel => "Low Stripper Liquid Level!!  Shutting down.",
        }
    }
}

/// A latched shutdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trip {
    pub code: TripCode,
    /// Time at which the interlock fired (h).
    pub time: f64,
}

impl Trip {
    pub fn message(&self) -> &'static str {
        self.code.message()
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shutdown {} at t = {:.4} h: {}",
            self.code.code(),
            self.time,
            self.message()
        )
    }
}

/// Quantities watched by the interlocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyReadings {
    /// kPa gauge
    pub reactor_pressure: f64,
    /// deg C
    pub reactor_temperature: f64,
    /// Liquid volumes (ft3).
    pub reactor_liquid: f64,
    pub separator_liquid: f64,
    pub stripper_liquid: f64,
}

const MAX_REACTOR_PRESSURE: f64 = 3000.0;
const MAX_REACTOR_TEMPERATURE: f64 = 175.0;
/// Level limits (m3).
const REACTOR_LEVEL: (f64, f64) = (2.0, 24.0);
const SEPARATOR_LEVEL: (f64, f64) = (1.0, 12.0);
const STRIPPER_LEVEL: (f64, f64) = (1.0, 8.0);

/// First violated interlock, if any.
pub fn check(r: &SafetyReadings) -> Option<TripCode> {
    let reactor = r.reactor_liquid / FT3_PER_M3;
    let separator = r.separator_liquid / FT3_PER_M3;
    let stripper = r.stripper_liquid / FT3_PER_M3;

    let checks = [
        (
            r.reactor_pressure > MAX_REACTOR_PRESSURE,
            TripCode::HighReactorPressure,
        ),
        (reactor > REACTOR_LEVEL.1, TripCode::HighReactorLevel),
        (reactor < REACTOR_LEVEL.0, TripCode::LowReactorLevel),
        (
            r.reactor_temperature > MAX_REACTOR_TEMPERATURE,
            TripCode::HighReactorTemperature,
        ),
        (separator > SEPARATOR_LEVEL.1, TripCode::HighSeparatorLevel),
        (separator < SEPARATOR_LEVEL.0, TripCode::LowSeparatorLevel),
        (stripper > STRIPPER_LEVEL.1, TripCode::HighStripperLevel),
        (stripper < STRIPPER_LEVEL.0, TripCode::LowStripperLevel),
    ];
    checks
        .into_iter()
        .find_map(|(hit, code)| hit.then_some(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal() -> SafetyReadings {
        SafetyReadings {
            reactor_pressure: 2705.0,
            reactor_temperature: 120.4,
            reactor_liquid: 16.0 * FT3_PER_M3,
            separator_liquid: 6.0 * FT3_PER_M3,
            stripper_liquid: 4.0 * FT3_PER_M3,
        }
    }

    #[test]
    fn normal_operation_passes() {
        assert_eq!(check(&normal()), None);
    }

    #[test]
    fn each_limit_trips() {
        let mut r = normal();
        r.reactor_liquid = 25.0 * FT3_PER_M3;
        assert_eq!(check(&r), Some(TripCode::HighReactorLevel));

        let mut r = normal();
        r.stripper_liquid = 0.5 * FT3_PER_M3;
        assert_eq!(check(&r), Some(TripCode::LowStripperLevel));

        let mut r = normal();
        r.reactor_temperature = 176.0;
        assert_eq!(check(&r), Some(TripCode::HighReactorTemperature));
    }

    #[test]
    fn first_condition_wins() {
        let mut r = normal();
        r.reactor_pressure = 3100.0;
        r.reactor_temperature = 180.0;
        r.separator_liquid = 0.0;
        assert_eq!(check(&r), Some(TripCode::HighReactorPressure));
    }

    #[test]
    fn message_and_code() {
        let trip = Trip {
            code: TripCode::HighReactorLevel,
            time: 0.0,
        };
        assert_eq!(trip.code.code(), 2);
        assert!(trip.message().contains("High Reactor Liquid Level"));
        assert!(trip.to_string().starts_with("shutdown 2"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn high_pressure_always_wins(
            pressure in 3000.1..10_000.0f64,
            temperature in 0.0..400.0f64,
            reactor in 0.0..40.0f64,
            separator in 0.0..20.0f64,
            stripper in 0.0..15.0f64,
        ) {
            let r = SafetyReadings {
                reactor_pressure: pressure,
                reactor_temperature: temperature,
                reactor_liquid: reactor * FT3_PER_M3,
                separator_liquid: separator * FT3_PER_M3,
                stripper_liquid: stripper * FT3_PER_M3,
            };
            prop_assert_eq!(check(&r), Some(TripCode::HighReactorPressure));
        }

        #[test]
        fn inside_limits_never_trips(
            pressure in 0.0..3000.0f64,
            temperature in 0.0..175.0f64,
            reactor in 2.01..23.99f64,
            separator in 1.01..11.99f64,
            stripper in 1.01..7.99f64,
        ) {
            let r = SafetyReadings {
                reactor_pressure: pressure,
                reactor_temperature: temperature,
                reactor_liquid: reactor * FT3_PER_M3,
                separator_liquid: separator * FT3_PER_M3,
                stripper_liquid: stripper * FT3_PER_M3,
            };
            prop_assert_eq!(check(&r), None);
        }
    }
}
