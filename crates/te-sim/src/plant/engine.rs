//! The plant instance and its derivative evaluation.

use te_controls::{DelayedAnalyzer, SampleConfig, ValveActuator};
use te_core::{
    FT3_PER_M3, KG_PER_LB, KSCMH_PER_KMOL_H, ensure_all_finite, ensure_len, kelvin_from_celsius,
    kpa_gauge,
};
use te_disturbances::{DisturbanceVector, DisturbanceWalks, RandomGenerator, WalkChannel};
use te_thermo::{Component, MoleFractions, NC, Phase, PropertyTable, ThermoModel};
use tracing::{debug, trace, warn};

use crate::error::SimResult;
use crate::plant::config::PlantConfig;
use crate::plant::flows::{
    Compressor, EFFLUENT_COEFF, PURGE_BACK_PRESSURE, PURGE_COEFF, REACTOR_FEED_COEFF,
    orifice_mass_flow, stripper_split,
};
use crate::plant::heat::{condenser_ua, cooling_water_rate, reactor_ua, stripper_steam_duty};
use crate::plant::layout::{
    CONDENSER_CW_OUTLET, HEADER_ENERGY, HEADER_VAPOR, N_INPUTS, N_MEASUREMENTS, N_STATES,
    REACTOR_CW_OUTLET, REACTOR_ENERGY, REACTOR_LIQUID, REACTOR_VAPOR, SEPARATOR_ENERGY,
    SEPARATOR_LIQUID, SEPARATOR_VAPOR, STRIPPER_ENERGY, STRIPPER_LIQUID, VALVES, heavy_liquid,
    holdups,
};
use crate::plant::measurements::{CONTINUOUS, FEED_ANALYZER, PRODUCT_ANALYZER, PURGE_ANALYZER};
use crate::plant::reactions::ReactionRates;
use crate::plant::shutdown::{SafetyReadings, Trip, check};
use crate::plant::streams::{Stream, StreamState, StreamTable};
use crate::plant::vessels::{GasHeader, LiquidPool, TwoPhaseVessel};

/// Full-scale flow of each valve; zero where the flow is pressure driven.
const VALVE_RANGE: [f64; N_INPUTS] = [
    400.0, 400.0, 100.0, 1500.0, 0.0, 0.0, 1500.0, 1000.0, 0.03, 1000.0, 1200.0, 0.0,
];

const D_FEED: [f64; NC] = [0.0, 1e-4, 0.0, 0.9999, 0.0, 0.0, 0.0, 0.0];
const E_FEED: [f64; NC] = [0.0, 0.0, 0.0, 0.0, 0.9999, 1e-4, 0.0, 0.0];
const A_FEED: [f64; NC] = [0.9999, 1e-4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// D, E and A feeds enter at a fixed temperature except D under IDV(3).
const FEED_TEMPERATURE: f64 = 45.0;

/// Cooling water holdup constants of the reactor jacket and condenser.
const REACTOR_CW_CAPACITY: f64 = 7060.0;
const CONDENSER_CW_CAPACITY: f64 = 11138.0;

/// Sticking-valve disturbance for each XMV, if any.
fn stiction_disturbance(valve: usize) -> Option<usize> {
    match valve {
        9 => Some(14),
        10 => Some(15),
        4 | 6 | 7 | 8 => Some(19),
        _ => None,
    }
}

/// Result of one derivative evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub derivatives: [f64; N_STATES],
    /// Latched shutdown, if any.
    pub trip: Option<Trip>,
    /// False if any temperature inversion fell back to its previous estimate.
    pub converged: bool,
}

/// Last temperature of each unit, used to start the next inversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct TemperatureGuesses {
    reactor: f64,
    separator: f64,
    stripper: f64,
    header: f64,
}

/// One Tennessee Eastman plant.
///
/// Owns every piece of mutable model state. Independent instances share
/// nothing, so replicate runs can live on separate threads.
#[derive(Debug, Clone)]
pub struct TennesseeEastman {
    config: PlantConfig,
    rng: RandomGenerator,
    walks: DisturbanceWalks,
    idv: DisturbanceVector,
    valves: Vec<ValveActuator>,
    feed_analyzer: DelayedAnalyzer<6>,
    purge_analyzer: DelayedAnalyzer<8>,
    product_analyzer: DelayedAnalyzer<5>,
    guesses: TemperatureGuesses,
    initial_state: [f64; N_STATES],
    measurements: [f64; N_MEASUREMENTS],
    streams: StreamTable,
    trip: Option<Trip>,
}

impl TennesseeEastman {
    /// Build a plant and evaluate it once at t = 0 with the valve commands
    /// equal to the initial valve positions.
    ///
    /// `state` overrides the nominal initial state (50 values); `idv` is the
    /// 20-long vector of host disturbance codes.
    pub fn initialize(config: PlantConfig, state: Option<&[f64]>, idv: &[i32]) -> SimResult<Self> {
        config.validate()?;

        let initial_state = match state {
            Some(values) => {
                ensure_len(values, N_STATES, "initial state")?;
                ensure_all_finite(values, "initial state")?;
                let mut y = [0.0; N_STATES];
                y.copy_from_slice(values);
                y
            }
            None => config.nominal_state,
        };

        let idv = DisturbanceVector::from_codes(idv)?;
        let rng = RandomGenerator::new(config.seed)?;
        let mut walks = DisturbanceWalks::with_params(config.walks)?;
        walks.apply_flags(&idv);
        let valves = config
            .valve_tau_seconds
            .iter()
            .map(|tau| ValveActuator::from_seconds(*tau, config.valve_deadband))
            .collect::<Result<Vec<_>, _>>()?;
        let gas = SampleConfig::new(config.gas_analyzer_period)?;
        let product = SampleConfig::new(config.product_analyzer_period)?;

        let mut plant = Self {
            config,
            rng,
            walks,
            idv,
            valves,
            feed_analyzer: DelayedAnalyzer::new(gas),
            purge_analyzer: DelayedAnalyzer::new(gas),
            product_analyzer: DelayedAnalyzer::new(product),
            guesses: TemperatureGuesses::default(),
            initial_state,
            measurements: [0.0; N_MEASUREMENTS],
            streams: StreamTable::default(),
            trip: None,
        };

        let mut inputs = [0.0; N_INPUTS];
        inputs.copy_from_slice(&initial_state[VALVES]);
        plant.evaluate(0.0, &initial_state, &inputs)?;
        debug!(
            seed = plant.config.seed,
            disturbances = ?plant.idv.active(),
            "plant initialized"
        );
        Ok(plant)
    }

    /// Start over with the same configuration. Clears the trip latch.
    pub fn reinitialize(&mut self, state: Option<&[f64]>, idv: &[i32]) -> SimResult<()> {
        *self = Self::initialize(self.config.clone(), state, idv)?;
        Ok(())
    }

    pub fn config(&self) -> &PlantConfig {
        &self.config
    }

    pub fn initial_state(&self) -> &[f64; N_STATES] {
        &self.initial_state
    }

    pub fn disturbances(&self) -> DisturbanceVector {
        self.idv
    }

    /// Replace the disturbance codes (20 host codes, positive means on).
    /// Takes effect at the next evaluation.
    pub fn set_disturbances(&mut self, codes: &[i32]) -> SimResult<()> {
        self.set_disturbance_vector(DisturbanceVector::from_codes(codes)?);
        Ok(())
    }

    pub fn set_disturbance_vector(&mut self, idv: DisturbanceVector) {
        self.idv = idv;
    }

    /// Measurements from the most recent evaluation.
    pub fn sample_outputs(&self) -> [f64; N_MEASUREMENTS] {
        self.measurements
    }

    pub fn is_tripped(&self) -> Option<Trip> {
        self.trip
    }

    /// Streams from the most recent evaluation.
    pub fn last_streams(&self) -> &StreamTable {
        &self.streams
    }

    /// Valve commands after deadband and clamping.
    pub fn applied_commands(&self) -> [f64; N_INPUTS] {
        let mut out = [0.0; N_INPUTS];
        for (o, v) in out.iter_mut().zip(&self.valves) {
            *o = v.applied();
        }
        out
    }

    /// Time derivatives of the 50 states and refreshed measurements.
    ///
    /// Advances the random walks and analyzers, so calls should come in
    /// non-decreasing time. Draws happen in a fixed order: walk channels,
    /// noise on XMEAS(1..22), then analyzer noise.
    pub fn evaluate(&mut self, t: f64, state: &[f64], inputs: &[f64]) -> SimResult<Evaluation> {
        ensure_len(state, N_STATES, "state")?;
        ensure_len(inputs, N_INPUTS, "inputs")?;
        let y = state;
        let table = &self.config.properties;
        let volumes = self.config.volumes;

        // Disturbance sources.
        self.walks.apply_flags(&self.idv);
        self.walks.advance_all(t, &mut self.rng);
        if t == 0.0 {
            self.walks.reset_all();
        }
        let walk = |ch: WalkChannel| self.walks.value(ch, t);
        let idv = |n: usize| self.idv.flag(n);

        let feed_a = walk(WalkChannel::FeedAFraction) - 0.03 * idv(1) - 0.00243719 * idv(2);
        let feed_b = walk(WalkChannel::FeedBFraction) + 0.005 * idv(2);
        let d_feed_temperature = walk(WalkChannel::DFeedTemperature) + 5.0 * idv(3);
        let c_feed_temperature = walk(WalkChannel::CFeedTemperature);
        let reactor_cw_inlet = walk(WalkChannel::ReactorCoolingInlet) + 5.0 * idv(4);
        let condenser_cw_inlet = walk(WalkChannel::CondenserCoolingInlet) + 5.0 * idv(5);
        let r1_factor = walk(WalkChannel::ReactionOneKinetics);
        let r2_factor = walk(WalkChannel::ReactionTwoKinetics);
        let steam_gain = walk(WalkChannel::SteamValveGain);
        let reactor_ht = walk(WalkChannel::ReactorHeatTransfer);
        let condenser_ht = walk(WalkChannel::CondenserHeatTransfer);
        let effluent_resistance = walk(WalkChannel::EffluentFlowResistance);

        // Units.
        let reactor = TwoPhaseVessel::evaluate(
            table,
            &y[REACTOR_VAPOR],
            &heavy_liquid(y, REACTOR_LIQUID),
            y[REACTOR_ENERGY],
            volumes.reactor,
            self.guesses.reactor,
        );
        let separator = TwoPhaseVessel::evaluate(
            table,
            &y[SEPARATOR_VAPOR],
            &heavy_liquid(y, SEPARATOR_LIQUID),
            y[SEPARATOR_ENERGY],
            volumes.separator,
            self.guesses.separator,
        );
        let stripper = LiquidPool::evaluate(
            table,
            &holdups(y, STRIPPER_LIQUID),
            y[STRIPPER_ENERGY],
            self.guesses.stripper,
        );
        let header = GasHeader::evaluate(
            table,
            &holdups(y, HEADER_VAPOR),
            y[HEADER_ENERGY],
            volumes.header,
            self.guesses.header,
        );
        self.guesses = TemperatureGuesses {
            reactor: reactor.temperature,
            separator: separator.temperature,
            stripper: stripper.temperature,
            header: header.temperature,
        };
        let converged =
            reactor.converged && separator.converged && stripper.converged && header.converged;
        if !converged {
            trace!(t, "using previous temperature estimate");
        }

        let reaction = ReactionRates::evaluate(
            kelvin_from_celsius(reactor.temperature),
            &reactor.partial_pressure,
            reactor.vapor_volume,
            r1_factor,
            r2_factor,
        );

        // Stream compositions, temperatures and enthalpies.
        let mut s = StreamTable::default();
        let mut ac_feed = [0.0; NC];
        ac_feed[0] = feed_a;
        ac_feed[1] = feed_b;
        ac_feed[2] = 1.0 - feed_a - feed_b;
        let (tcr, tcs, tcc) = (
            reactor.temperature,
            separator.temperature,
            stripper.temperature,
        );
        for (stream, x, temperature, phase) in [
            (Stream::DFeed, MoleFractions::from_raw(D_FEED), d_feed_temperature, Phase::Vapor),
            (Stream::EFeed, MoleFractions::from_raw(E_FEED), FEED_TEMPERATURE, Phase::Vapor),
            (Stream::AFeed, MoleFractions::from_raw(A_FEED), FEED_TEMPERATURE, Phase::Vapor),
            (Stream::AcFeed, MoleFractions::from_raw(ac_feed), c_feed_temperature, Phase::Vapor),
            (Stream::ReactorFeed, header.vapor, header.temperature, Phase::Vapor),
            (Stream::ReactorEffluent, reactor.vapor, tcr, Phase::Vapor),
            (Stream::Recycle, separator.vapor, tcs, Phase::Vapor),
            (Stream::Purge, separator.vapor, tcs, Phase::Vapor),
            (Stream::SeparatorUnderflow, separator.liquid, tcs, Phase::Liquid),
            (Stream::Product, stripper.liquid, tcc, Phase::Liquid),
        ] {
            fill(&mut s[stream], table, x, temperature, phase);
        }

        // Flows.
        let mut vpos = [0.0; N_INPUTS];
        vpos.copy_from_slice(&y[VALVES]);
        let valve_flow = |i: usize| vpos[i] * VALVE_RANGE[i] / 100.0;

        s[Stream::DFeed].flow = valve_flow(0);
        s[Stream::EFeed].flow = valve_flow(1);
        s[Stream::AFeed].flow = valve_flow(2) * (1.0 - idv(6));
        s[Stream::AcFeed].flow = valve_flow(3) * (1.0 - 0.2 * idv(7)) + 1e-10;
        s[Stream::SeparatorUnderflow].flow = valve_flow(6);
        s[Stream::Product].flow = valve_flow(7);
        let steam_ua = valve_flow(8) * (steam_gain + 1.0);
        let reactor_cw_flow = valve_flow(9);
        let condenser_cw_flow = valve_flow(10);
        let agitator = (vpos[11] + 150.0) / 100.0;

        let (ptr, pts, ptv) = (reactor.pressure, separator.pressure, header.pressure);
        s[Stream::ReactorFeed].flow = orifice_mass_flow(ptv - ptr, REACTOR_FEED_COEFF)
            / s[Stream::ReactorFeed].molar_mass;
        s[Stream::ReactorEffluent].flow = orifice_mass_flow(ptr - pts, EFFLUENT_COEFF)
            * (1.0 - 0.25 * effluent_resistance)
            / s[Stream::ReactorEffluent].molar_mass;
        s[Stream::Purge].flow = vpos[5] * orifice_mass_flow(pts - PURGE_BACK_PRESSURE, PURGE_COEFF)
            / s[Stream::Purge].molar_mass;

        let compressor = Compressor::default().evaluate(
            pts,
            ptv,
            tcs,
            s[Stream::Recycle].molar_mass,
            vpos[4],
        );
        let recycle = &mut s[Stream::Recycle];
        recycle.flow = compressor.mass_flow / recycle.molar_mass;
        recycle.enthalpy += compressor.work / recycle.flow;

        for stream in [
            Stream::DFeed,
            Stream::EFeed,
            Stream::AFeed,
            Stream::AcFeed,
            Stream::ReactorFeed,
            Stream::ReactorEffluent,
            Stream::Recycle,
            Stream::Purge,
            Stream::SeparatorUnderflow,
            Stream::Product,
        ] {
            s[stream].distribute_flow();
        }

        // Stripper: the A&C feed and the separator underflow split into
        // overhead vapor and liquid to the sump.
        let split = stripper_split(
            s[Stream::AcFeed].flow,
            s[Stream::SeparatorUnderflow].flow,
            tcc,
        );
        let mut overhead = [0.0; NC];
        let mut bottoms = [0.0; NC];
        for i in 0..NC {
            let fin =
                s[Stream::AcFeed].component_flow[i] + s[Stream::SeparatorUnderflow].component_flow[i];
            overhead[i] = split[i] * fin;
            bottoms[i] = fin - overhead[i];
        }
        for (stream, amounts, phase) in [
            (Stream::StripperOverhead, overhead, Phase::Vapor),
            (Stream::StripperLiquid, bottoms, Phase::Liquid),
        ] {
            let (x, total) = MoleFractions::from_amounts(&amounts);
            let st = &mut s[stream];
            fill(st, table, x, tcc, phase);
            st.flow = total;
            st.component_flow = amounts;
        }
        s[Stream::ReactorInlet] = s[Stream::ReactorFeed];

        // Heat duties.
        let twr = y[REACTOR_CW_OUTLET];
        let tws = y[CONDENSER_CW_OUTLET];
        let qur = reactor_ua(reactor.liquid_volume, agitator) * (twr - tcr) * (1.0 - 0.35 * reactor_ht);
        let qus = condenser_ua(s[Stream::ReactorEffluent].flow)
            * (tws - tcr)
            * (1.0 - 0.25 * condenser_ht);
        let quc = stripper_steam_duty(steam_ua, tcc);

        // Continuous measurements.
        let mut xmeas = [0.0; N_MEASUREMENTS];
        xmeas[0] = s[Stream::AFeed].flow * KSCMH_PER_KMOL_H;
        xmeas[1] = s[Stream::DFeed].flow * s[Stream::DFeed].molar_mass * KG_PER_LB;
        xmeas[2] = s[Stream::EFeed].flow * s[Stream::EFeed].molar_mass * KG_PER_LB;
        xmeas[3] = s[Stream::AcFeed].flow * KSCMH_PER_KMOL_H;
        xmeas[4] = s[Stream::Recycle].flow * KSCMH_PER_KMOL_H;
        xmeas[5] = s[Stream::ReactorFeed].flow * KSCMH_PER_KMOL_H;
        xmeas[6] = kpa_gauge(ptr);
        xmeas[7] = (reactor.liquid_volume - 84.6) / 666.7 * 100.0;
        xmeas[8] = tcr;
        xmeas[9] = s[Stream::Purge].flow * KSCMH_PER_KMOL_H;
        xmeas[10] = tcs;
        xmeas[11] = (separator.liquid_volume - 27.5) / 290.0 * 100.0;
        xmeas[12] = kpa_gauge(pts);
        xmeas[13] = s[Stream::SeparatorUnderflow].flow / separator.density / FT3_PER_M3;
        xmeas[14] = (stripper.volume - 78.25) / volumes.stripper * 100.0;
        xmeas[15] = kpa_gauge(ptv);
        xmeas[16] = s[Stream::Product].flow / stripper.density / FT3_PER_M3;
        xmeas[17] = tcc;
        xmeas[18] = quc * 1040.0 * KG_PER_LB;
        xmeas[19] = compressor.work * 293.07;
        xmeas[20] = twr;
        xmeas[21] = tws;

        if self.trip.is_none() {
            let readings = SafetyReadings {
                reactor_pressure: xmeas[6],
                reactor_temperature: tcr,
                reactor_liquid: reactor.liquid_volume,
                separator_liquid: separator.liquid_volume,
                stripper_liquid: stripper.volume,
            };
            if let Some(code) = check(&readings) {
                let trip = Trip { code, time: t };
                warn!(code = code.code(), t, "{}", trip.message());
                self.trip = Some(trip);
            }
        }

        let noise_std = &self.config.noise_std;
        if t > 0.0 && self.trip.is_none() {
            for i in CONTINUOUS {
                xmeas[i] += self.rng.sum_of_twelve_uniforms(noise_std[i]);
            }
        }

        // Analyzers read mole percent.
        let feed: [f64; 6] = mole_percent(&s[Stream::ReactorInlet].x, 0);
        let purge: [f64; 8] = mole_percent(&s[Stream::Purge].x, 0);
        let product: [f64; 5] = mole_percent(&s[Stream::Product].x, Component::D.index());
        if t == 0.0 {
            self.feed_analyzer.seed(t, &feed);
            self.purge_analyzer.seed(t, &purge);
            self.product_analyzer.seed(t, &product);
        } else {
            let rng = &mut self.rng;
            self.feed_analyzer.scan(t, &feed, |i| {
                rng.sum_of_twelve_uniforms(noise_std[FEED_ANALYZER.start + i])
            });
            self.purge_analyzer.scan(t, &purge, |i| {
                rng.sum_of_twelve_uniforms(noise_std[PURGE_ANALYZER.start + i])
            });
            self.product_analyzer.scan(t, &product, |i| {
                rng.sum_of_twelve_uniforms(noise_std[PRODUCT_ANALYZER.start + i])
            });
        }
        xmeas[FEED_ANALYZER].copy_from_slice(self.feed_analyzer.reported());
        xmeas[PURGE_ANALYZER].copy_from_slice(self.purge_analyzer.reported());
        xmeas[PRODUCT_ANALYZER].copy_from_slice(self.product_analyzer.reported());
        self.measurements = xmeas;

        // Balances.
        let mut dy = [0.0; N_STATES];
        let fcm = |stream: Stream| s[stream].component_flow;
        for i in 0..NC {
            dy[i] = fcm(Stream::ReactorInlet)[i] - fcm(Stream::ReactorEffluent)[i]
                + reaction.generation[i];
            dy[SEPARATOR_VAPOR.start + i] = fcm(Stream::ReactorEffluent)[i]
                - fcm(Stream::Recycle)[i]
                - fcm(Stream::Purge)[i]
                - fcm(Stream::SeparatorUnderflow)[i];
            dy[STRIPPER_LIQUID.start + i] =
                fcm(Stream::StripperLiquid)[i] - fcm(Stream::Product)[i];
            dy[HEADER_VAPOR.start + i] = fcm(Stream::DFeed)[i]
                + fcm(Stream::EFeed)[i]
                + fcm(Stream::AFeed)[i]
                + fcm(Stream::StripperOverhead)[i]
                + fcm(Stream::Recycle)[i]
                - fcm(Stream::ReactorFeed)[i];
        }
        let hf = |stream: Stream| s[stream].enthalpy * s[stream].flow;
        dy[REACTOR_ENERGY] =
            hf(Stream::ReactorInlet) - hf(Stream::ReactorEffluent) + reaction.heat + qur;
        // Compressor work enters through the recycle enthalpy only.
        dy[SEPARATOR_ENERGY] = hf(Stream::ReactorEffluent)
            - hf(Stream::Recycle)
            - hf(Stream::Purge)
            - hf(Stream::SeparatorUnderflow)
            + qus;
        dy[STRIPPER_ENERGY] = hf(Stream::AcFeed) + hf(Stream::SeparatorUnderflow)
            - hf(Stream::StripperOverhead)
            - hf(Stream::Product)
            + quc;
        dy[HEADER_ENERGY] = hf(Stream::DFeed)
            + hf(Stream::EFeed)
            + hf(Stream::AFeed)
            + hf(Stream::StripperOverhead)
            + hf(Stream::Recycle)
            - hf(Stream::ReactorFeed);
        dy[REACTOR_CW_OUTLET] = cooling_water_rate(
            reactor_cw_flow,
            reactor_cw_inlet,
            twr,
            qur,
            REACTOR_CW_CAPACITY,
        );
        dy[CONDENSER_CW_OUTLET] = cooling_water_rate(
            condenser_cw_flow,
            condenser_cw_inlet,
            tws,
            qus,
            CONDENSER_CW_CAPACITY,
        );

        // Valves.
        for (i, valve) in self.valves.iter_mut().enumerate() {
            let sticking = stiction_disturbance(i).is_some_and(|n| self.idv.is_active(n));
            valve.set_stiction(sticking);
            valve.update_commanded(inputs[i], t == 0.0);
            dy[VALVES.start + i] = valve.dpdt(vpos[i]);
        }

        if t > 0.0 && self.trip.is_some() {
            dy = [0.0; N_STATES];
        }
        self.streams = s;

        Ok(Evaluation {
            derivatives: dy,
            trip: self.trip,
            converged,
        })
    }
}

/// `N` consecutive mole fractions from `from`, in percent.
fn mole_percent<const N: usize>(x: &MoleFractions, from: usize) -> [f64; N] {
    std::array::from_fn(|i| x[from + i] * 100.0)
}

/// Set composition, temperature and enthalpy of a stream.
fn fill(stream: &mut StreamState, table: &PropertyTable, x: MoleFractions, t: f64, phase: Phase) {
    stream.set_composition(x, table);
    stream.temperature = t;
    stream.enthalpy = table.enthalpy(&x, t, phase);
}
