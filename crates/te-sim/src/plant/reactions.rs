//! Reactor kinetics.
//!
//! Four irreversible vapor-phase reactions:
//!
//! ```text
//! A(g) + C(g) + D(g) -> G(liq)
//! A(g) + C(g) + E(g) -> H(liq)
//! A(g) + E(g)        -> F(liq)
//! 3 D(g)             -> 2 F(liq)
//! ```

use te_thermo::NC;

/// Heats of reaction of reactions 1 and 2.
const HEAT_OF_REACTION: [f64; 2] = [0.06899381054, 0.05];

/// `ln k = a - b / T` per reaction (T in K).
const ARRHENIUS: [(f64, f64); 3] = [
    (31.5859536, 20130.85052843482),
    (3.00094014, 10065.42526421741),
    (53.4060443, 30196.27579265224),
];

const RATE4_OVER_RATE3: f64 = 0.767488334;
const A_ORDER: f64 = 1.1544;
const C_ORDER: f64 = 0.3735;

/// Reaction rates and what they do to the reactor contents.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReactionRates {
    /// kmol/h per reaction
    pub rates: [f64; 4],
    /// Net generation per component (kmol/h), negative for consumption.
    pub generation: [f64; NC],
    /// Heat released.
    pub heat: f64,
}

impl ReactionRates {
    /// Evaluate at reactor temperature `tk` (K), partial pressures `pp`
    /// and vapor volume `vapor_volume`.
    ///
    /// `r1_factor` and `r2_factor` scale the first two rate constants (slow
    /// kinetics drift). Reactions 1 and 2 are exactly zero unless both A and C
    /// partial pressures are positive.
    pub fn evaluate(
        tk: f64,
        pp: &[f64; NC],
        vapor_volume: f64,
        r1_factor: f64,
        r2_factor: f64,
    ) -> Self {
        let k = |i: usize| (ARRHENIUS[i].0 - ARRHENIUS[i].1 / tk).exp();
        let mut r = [
            k(0) * r1_factor,
            k(1) * r2_factor,
            k(2),
            k(2) * RATE4_OVER_RATE3,
        ];

        let (pa, pc, pd, pe) = (pp[0], pp[2], pp[3], pp[4]);
        if pa > 0.0 && pc > 0.0 {
            let ac = pa.powf(A_ORDER) * pc.powf(C_ORDER);
            r[0] *= ac * pd;
            r[1] *= ac * pe;
        } else {
            r[0] = 0.0;
            r[1] = 0.0;
        }
        r[2] *= pa * pe;
        r[3] *= pa * pd;
        for ri in &mut r {
            *ri *= vapor_volume;
        }

        let generation = [
            -r[0] - r[1] - r[2],
            0.0,
            -r[0] - r[1],
            -r[0] - 1.5 * r[3],
            -r[1] - r[2],
            r[2] + r[3],
            r[0],
            r[1],
        ];
        let heat = r[0] * HEAT_OF_REACTION[0] + r[1] * HEAT_OF_REACTION[1];

        Self {
            rates: r,
            generation,
            heat,
        }
    }
}
