//! The thirteen process streams.

use std::ops::{Index, IndexMut};

use te_thermo::{MoleFractions, NC, PropertyTable};

/// Number of named streams.
pub const N_STREAMS: usize = 13;

/// Streams in model numbering (1-based in the plant documentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// 1: D feed.
    DFeed,
    /// 2: E feed.
    EFeed,
    /// 3: A feed.
    AFeed,
    /// 4: A and C feed to the stripper.
    AcFeed,
    /// 5: stripper overhead, returned to the compressor header.
    StripperOverhead,
    /// 6: header outlet to the reactor.
    ReactorFeed,
    /// 7: reactor inlet, identical to stream 6.
    ReactorInlet,
    /// 8: reactor effluent to the condenser and separator.
    ReactorEffluent,
    /// 9: separator vapor to the recycle compressor.
    Recycle,
    /// 10: purge.
    Purge,
    /// 11: separator underflow to the stripper.
    SeparatorUnderflow,
    /// 12: stripper liquid to the sump.
    StripperLiquid,
    /// 13: product.
    Product,
}

impl Stream {
    pub const ALL: [Stream; N_STREAMS] = [
        Stream::DFeed,
        Stream::EFeed,
        Stream::AFeed,
        Stream::AcFeed,
        Stream::StripperOverhead,
        Stream::ReactorFeed,
        Stream::ReactorInlet,
        Stream::ReactorEffluent,
        Stream::Recycle,
        Stream::Purge,
        Stream::SeparatorUnderflow,
        Stream::StripperLiquid,
        Stream::Product,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// 1-based stream number.
    pub fn number(self) -> usize {
        self.index() + 1
    }
}

/// Composition and conditions of one stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamState {
    pub x: MoleFractions,
    /// deg C
    pub temperature: f64,
    /// Molar enthalpy
    pub enthalpy: f64,
    /// Total molar flow (kmol/h)
    pub flow: f64,
    /// Component molar flows (kmol/h)
    pub component_flow: [f64; NC],
    /// Mean molar mass (kg/kmol)
    pub molar_mass: f64,
}

impl Default for StreamState {
    fn default() -> Self {
        Self {
            x: MoleFractions::from_raw([0.0; NC]),
            temperature: 0.0,
            enthalpy: 0.0,
            flow: 0.0,
            component_flow: [0.0; NC],
            molar_mass: 0.0,
        }
    }
}

impl StreamState {
    /// Set composition and refresh molar mass.
    pub fn set_composition(&mut self, x: MoleFractions, table: &PropertyTable) {
        self.x = x;
        self.molar_mass = x.molar_mass(table);
    }

    /// Component flows from the current composition and total flow.
    pub fn distribute_flow(&mut self) {
        self.component_flow = self.x.scaled(self.flow);
    }
}

/// Snapshot of every stream for one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamTable {
    streams: [StreamState; N_STREAMS],
}

impl StreamTable {
    pub fn iter(&self) -> impl Iterator<Item = (Stream, &StreamState)> + '_ {
        Stream::ALL.iter().copied().zip(self.streams.iter())
    }

    /// Largest `|sum(x) - 1|` over streams that carry flow.
    pub fn max_closure_error(&self) -> f64 {
        self.streams
            .iter()
            .filter(|s| s.flow > 0.0)
            .map(|s| (s.x.sum() - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

impl Index<Stream> for StreamTable {
    type Output = StreamState;

    fn index(&self, s: Stream) -> &StreamState {
        &self.streams[s.index()]
    }
}

impl IndexMut<Stream> for StreamTable {
    fn index_mut(&mut self, s: Stream) -> &mut StreamState {
        &mut self.streams[s.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_is_one_based() {
        assert_eq!(Stream::DFeed.number(), 1);
        assert_eq!(Stream::Product.number(), 13);
        assert_eq!(Stream::ALL.len(), N_STREAMS);
    }

    #[test]
    fn closure_error_ignores_idle_streams() {
        let table = PropertyTable::standard();
        let mut streams = StreamTable::default();
        let mut s = StreamState::default();
        s.set_composition(
            MoleFractions::from_raw([0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            &table,
        );
        s.flow = 10.0;
        s.distribute_flow();
        streams[Stream::Purge] = s;
        assert_eq!(streams.max_closure_error(), 0.0);
        assert_eq!(streams[Stream::Purge].component_flow[1], 5.0);
        assert!((streams[Stream::Purge].molar_mass - 13.7).abs() < 1e-12);
    }
}
