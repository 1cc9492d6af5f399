// te-core/src/units.rs
//
// The plant model works in its own engineering units: pressures in
// atmosphere/760 (mmHg-like), temperatures in deg C, volumes in ft3 and flows in
// kmol/h. Conversions to the reported units happen only at the measurement
// boundary.

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomTemperature};
use uom::si::pressure::{atmosphere, kilopascal};
use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};

pub type Pressure = UomPressure;
pub type Temperature = UomTemperature;

/// Model pressure units per standard atmosphere.
pub const MODEL_PRESSURE_PER_ATM: f64 = 760.0;

/// Cubic feet per cubic metre, as used by the model's level and flow outputs.
pub const FT3_PER_M3: f64 = 35.3145;

/// Standard cubic metres per kmol divided by ft3 per m3 gives kscmh per kmol/h.
pub const KSCMH_PER_KMOL_H: f64 = 0.359 / FT3_PER_M3;

/// Kilograms per pound.
pub const KG_PER_LB: f64 = 0.454;

/// Build a pressure from the model's internal unit (atm/760).
#[inline]
pub fn model_pressure(p: f64) -> Pressure {
    Pressure::new::<atmosphere>(p / MODEL_PRESSURE_PER_ATM)
}

/// Convert a model pressure to kPa gauge.
#[inline]
pub fn kpa_gauge(p: f64) -> f64 {
    (model_pressure(p) - Pressure::new::<atmosphere>(1.0)).get::<kilopascal>()
}

#[inline]
pub fn celsius(t: f64) -> Temperature {
    Temperature::new::<degree_celsius>(t)
}

/// Absolute temperature in kelvin from deg C.
#[inline]
pub fn kelvin_from_celsius(t: f64) -> f64 {
    celsius(t).get::<kelvin>()
}
