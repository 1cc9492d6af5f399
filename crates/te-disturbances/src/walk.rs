//! Cubic-spline random walks.
//!
//! Each channel is a piecewise cubic in `t - t_last`. When time reaches the
//! channel's next breakpoint, the segment is re-fitted to a freshly drawn
//! target, keeping value and slope continuous. Pulse-capable channels instead
//! alternate between a random-width parabolic pulse and a fixed 0.1 h decay
//! back to zero.

use serde::{Deserialize, Serialize};
use te_core::cubic;
use tracing::debug;

use crate::error::{DisturbanceError, DisturbanceResult};
use crate::idv::DisturbanceVector;
use crate::rng::{Draw, RandomGenerator};

/// Number of walk channels in the plant.
pub const N_WALKS: usize = 12;

/// Breakpoint scheduled for every channel on reset.
pub const FIRST_BREAKPOINT: f64 = 0.1;

/// Pulse height above which a pulse-capable channel starts to decay.
const PULSE_DECAY_THRESHOLD: f64 = 0.1;

/// Width of the decay segment (h).
const DECAY_WIDTH: f64 = 0.1;

/// Coefficients of `a + b*h + c*h^2 + d*h^3`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CubicSegment {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CubicSegment {
    pub const fn constant(value: f64) -> Self {
        Self {
            a: value,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        }
    }

    /// Hermite segment of width `h` from `(s0, sp0)` to `(s1, sp1)`.
    pub fn hermite(s0: f64, sp0: f64, s1: f64, sp1: f64, h: f64) -> Self {
        Self {
            a: s0,
            b: sp0,
            c: (3.0 * (s1 - s0) - h * (sp1 + 2.0 * sp0)) / (h * h),
            d: (2.0 * (s0 - s1) + h * (sp1 + sp0)) / (h * h * h),
        }
    }

    /// Segment that brings `(s, sp)` to zero value and slope over 0.1 h.
    pub fn decay(s: f64, sp: f64) -> Self {
        Self {
            a: s,
            b: sp,
            c: -(3.0 * s + 0.2 * sp) / (DECAY_WIDTH * DECAY_WIDTH),
            d: (2.0 * s + 0.1 * sp) / (DECAY_WIDTH * DECAY_WIDTH * DECAY_WIDTH),
        }
    }

    #[inline]
    pub fn value(&self, h: f64) -> f64 {
        cubic(self.a, self.b, self.c, self.d, h)
    }

    #[inline]
    pub fn slope(&self, h: f64) -> f64 {
        self.b + h * (2.0 * self.c + 3.0 * self.d * h)
    }
}

/// Spans and zero levels of a channel.
///
/// The horizon is drawn as `h_span*U + h_zero` with `U` in [-1, 1), the target
/// value as `s_span*U*flag + s_zero` and the target slope as
/// `sp_span*U*flag`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkParams {
    pub h_span: f64,
    pub h_zero: f64,
    pub s_span: f64,
    pub s_zero: f64,
    pub sp_span: f64,
}

impl WalkParams {
    pub fn new(
        h_span: f64,
        h_zero: f64,
        s_span: f64,
        s_zero: f64,
        sp_span: f64,
    ) -> DisturbanceResult<Self> {
        let params = Self {
            h_span,
            h_zero,
            s_span,
            s_zero,
            sp_span,
        };
        params.validate()?;
        Ok(params)
    }

    /// Every drawn horizon must be strictly positive.
    pub fn validate(&self) -> DisturbanceResult<()> {
        let all = [
            self.h_span,
            self.h_zero,
            self.s_span,
            self.s_zero,
            self.sp_span,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(DisturbanceError::InvalidArg {
                what: "walk parameters must be finite",
            });
        }
        if self.h_span < 0.0 || self.s_span < 0.0 || self.sp_span < 0.0 {
            return Err(DisturbanceError::InvalidArg {
                what: "walk spans must be non-negative",
            });
        }
        if self.h_zero <= self.h_span {
            return Err(DisturbanceError::InvalidArg {
                what: "walk horizon zero level must exceed its span",
            });
        }
        Ok(())
    }

    const fn raw(h_span: f64, h_zero: f64, s_span: f64, s_zero: f64) -> Self {
        Self {
            h_span,
            h_zero,
            s_span,
            s_zero,
            sp_span: 0.0,
        }
    }
}

/// How a channel behaves at a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkMode {
    /// Always re-fit a continuous Hermite segment.
    Continuous,
    /// Alternate between random pulses and deterministic decay.
    PulseCapable,
}

/// One random-walk channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomWalk {
    params: WalkParams,
    mode: WalkMode,
    segment: CubicSegment,
    t_last: f64,
    t_next: f64,
    active: bool,
}

impl RandomWalk {
    pub fn new(params: WalkParams, mode: WalkMode) -> Self {
        let mut walk = Self {
            params,
            mode,
            segment: CubicSegment::default(),
            t_last: 0.0,
            t_next: FIRST_BREAKPOINT,
            active: false,
        };
        walk.reset();
        walk
    }

    /// Back to the zero level, first breakpoint at 0.1 h.
    pub fn reset(&mut self) {
        self.segment = CubicSegment::constant(self.params.s_zero);
        self.t_last = 0.0;
        self.t_next = FIRST_BREAKPOINT;
    }

    pub fn params(&self) -> &WalkParams {
        &self.params
    }

    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    pub fn segment(&self) -> &CubicSegment {
        &self.segment
    }

    pub fn t_last(&self) -> f64 {
        self.t_last
    }

    pub fn t_next(&self) -> f64 {
        self.t_next
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the random excursion (the "flag" multiplier).
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn flag(&self) -> f64 {
        if self.active { 1.0 } else { 0.0 }
    }

    pub fn value_at(&self, t: f64) -> f64 {
        self.segment.value(t - self.t_last)
    }

    pub fn slope_at(&self, t: f64) -> f64 {
        self.segment.slope(t - self.t_last)
    }

    /// Re-fit the segment if `t` has reached the breakpoint.
    ///
    /// At most one re-fit happens per call, even if `t` has skipped several
    /// horizons. Returns whether a breakpoint was taken.
    pub fn advance(&mut self, t: f64, rng: &mut RandomGenerator) -> bool {
        if t < self.t_next {
            return false;
        }
        let h = self.t_next - self.t_last;
        let s = self.segment.value(h);
        let sp = self.segment.slope(h);
        self.t_last = self.t_next;

        match self.mode {
            WalkMode::Continuous => self.reparameterize(s, sp, rng),
            WalkMode::PulseCapable if s > PULSE_DECAY_THRESHOLD => {
                self.segment = CubicSegment::decay(s, sp);
                self.t_next = self.t_last + DECAY_WIDTH;
            }
            WalkMode::PulseCapable => {
                let width =
                    self.params.h_span * rng.next_uniform(Draw::Signed) + self.params.h_zero;
                self.segment = CubicSegment {
                    a: 0.0,
                    b: 0.0,
                    c: self.flag() / (width * width),
                    d: 0.0,
                };
                self.t_next = self.t_last + width;
            }
        }
        true
    }

    /// Draw horizon, target and target slope (in that order) and fit a
    /// Hermite segment from `(s, sp)`.
    fn reparameterize(&mut self, s: f64, sp: f64, rng: &mut RandomGenerator) {
        let p = self.params;
        let flag = self.flag();
        let h = p.h_span * rng.next_uniform(Draw::Signed) + p.h_zero;
        let s1 = p.s_span * rng.next_uniform(Draw::Signed) * flag + p.s_zero;
        let s1p = p.sp_span * rng.next_uniform(Draw::Signed) * flag;
        self.segment = CubicSegment::hermite(s, sp, s1, s1p, h);
        self.t_next = self.t_last + h;
    }
}

/// Named walk channels in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkChannel {
    FeedAFraction,
    FeedBFraction,
    DFeedTemperature,
    CFeedTemperature,
    ReactorCoolingInlet,
    CondenserCoolingInlet,
    ReactionOneKinetics,
    ReactionTwoKinetics,
    SteamValveGain,
    ReactorHeatTransfer,
    CondenserHeatTransfer,
    EffluentFlowResistance,
}

impl WalkChannel {
    pub const ALL: [WalkChannel; N_WALKS] = [
        WalkChannel::FeedAFraction,
        WalkChannel::FeedBFraction,
        WalkChannel::DFeedTemperature,
        WalkChannel::CFeedTemperature,
        WalkChannel::ReactorCoolingInlet,
        WalkChannel::CondenserCoolingInlet,
        WalkChannel::ReactionOneKinetics,
        WalkChannel::ReactionTwoKinetics,
        WalkChannel::SteamValveGain,
        WalkChannel::ReactorHeatTransfer,
        WalkChannel::CondenserHeatTransfer,
        WalkChannel::EffluentFlowResistance,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// IDV number that activates this channel.
    pub fn idv(self) -> usize {
        match self {
            WalkChannel::FeedAFraction | WalkChannel::FeedBFraction => 8,
            WalkChannel::DFeedTemperature => 9,
            WalkChannel::CFeedTemperature => 10,
            WalkChannel::ReactorCoolingInlet => 11,
            WalkChannel::CondenserCoolingInlet => 12,
            WalkChannel::ReactionOneKinetics | WalkChannel::ReactionTwoKinetics => 13,
            WalkChannel::SteamValveGain => 16,
            WalkChannel::ReactorHeatTransfer => 17,
            WalkChannel::CondenserHeatTransfer => 18,
            WalkChannel::EffluentFlowResistance => 20,
        }
    }

    pub fn mode(self) -> WalkMode {
        match self {
            WalkChannel::ReactorHeatTransfer
            | WalkChannel::CondenserHeatTransfer
            | WalkChannel::EffluentFlowResistance => WalkMode::PulseCapable,
            _ => WalkMode::Continuous,
        }
    }

    /// Parameters of the standard plant.
    pub fn standard_params(self) -> WalkParams {
        match self {
            WalkChannel::FeedAFraction => WalkParams::raw(0.2, 0.5, 0.03, 0.485),
            WalkChannel::FeedBFraction => WalkParams::raw(0.7, 1.0, 0.003, 0.005),
            WalkChannel::DFeedTemperature => WalkParams::raw(0.25, 0.5, 10.0, 45.0),
            WalkChannel::CFeedTemperature => WalkParams::raw(0.7, 1.0, 10.0, 45.0),
            WalkChannel::ReactorCoolingInlet => WalkParams::raw(0.15, 0.25, 10.0, 35.0),
            WalkChannel::CondenserCoolingInlet => WalkParams::raw(0.15, 0.25, 10.0, 40.0),
            WalkChannel::ReactionOneKinetics | WalkChannel::ReactionTwoKinetics => {
                WalkParams::raw(1.0, 2.0, 0.25, 1.0)
            }
            WalkChannel::SteamValveGain => WalkParams::raw(0.4, 0.5, 0.25, 0.0),
            WalkChannel::ReactorHeatTransfer => WalkParams::raw(1.5, 2.0, 0.0, 0.0),
            WalkChannel::CondenserHeatTransfer => WalkParams::raw(2.0, 3.0, 0.0, 0.0),
            WalkChannel::EffluentFlowResistance => WalkParams::raw(1.5, 2.0, 0.0, 0.0),
        }
    }
}

/// The twelve walk channels of one plant instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DisturbanceWalks {
    channels: [RandomWalk; N_WALKS],
}

impl DisturbanceWalks {
    pub fn standard() -> Self {
        Self {
            channels: WalkChannel::ALL
                .map(|ch| RandomWalk::new(ch.standard_params(), ch.mode())),
        }
    }

    /// Build from custom parameters, in [`WalkChannel::ALL`] order.
    pub fn with_params(params: [WalkParams; N_WALKS]) -> DisturbanceResult<Self> {
        for p in &params {
            p.validate()?;
        }
        let mut i = 0;
        Ok(Self {
            channels: params.map(|p| {
                let walk = RandomWalk::new(p, WalkChannel::ALL[i].mode());
                i += 1;
                walk
            }),
        })
    }

    pub fn channel(&self, ch: WalkChannel) -> &RandomWalk {
        &self.channels[ch.index()]
    }

    pub fn value(&self, ch: WalkChannel, t: f64) -> f64 {
        self.channels[ch.index()].value_at(t)
    }

    /// Copy activation flags from the disturbance codes.
    pub fn apply_flags(&mut self, idv: &DisturbanceVector) {
        for ch in WalkChannel::ALL {
            self.channels[ch.index()].set_active(idv.is_active(ch.idv()));
        }
    }

    /// Advance every channel in ascending order; returns how many re-fitted.
    pub fn advance_all(&mut self, t: f64, rng: &mut RandomGenerator) -> usize {
        let mut taken = 0;
        for ch in WalkChannel::ALL {
            let walk = &mut self.channels[ch.index()];
            if walk.advance(t, rng) {
                taken += 1;
                debug!(channel = ?ch, t, t_next = walk.t_next(), "walk breakpoint");
            }
        }
        taken
    }

    pub fn reset_all(&mut self) {
        for walk in &mut self.channels {
            walk.reset();
        }
    }
}

impl Default for DisturbanceWalks {
    fn default() -> Self {
        Self::standard()
    }
}
