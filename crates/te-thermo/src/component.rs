//! Chemical components of the process.

/// Number of chemical components.
pub const NC: usize = 8;

/// The eight components of the Tennessee Eastman process.
///
/// A, C, D and E are reactants, B is an inert, F is a by-product and G, H are
/// the two products. Only A, B and C are treated as non-condensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Component {
    pub const ALL: [Component; NC] = [
        Component::A,
        Component::B,
        Component::C,
        Component::D,
        Component::E,
        Component::F,
        Component::G,
        Component::H,
    ];

    /// Components whose vapor holdup is an integrator state.
    pub const NON_CONDENSIBLE: [Component; 3] = [Component::A, Component::B, Component::C];

    /// Components whose vapor fraction follows from their vapor pressure.
    pub const CONDENSIBLE: [Component; 5] = [
        Component::D,
        Component::E,
        Component::F,
        Component::G,
        Component::H,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Component::A => "A",
            Component::B => "B",
            Component::C => "C",
            Component::D => "D",
            Component::E => "E",
            Component::F => "F",
            Component::G => "G",
            Component::H => "H",
        }
    }

    pub fn is_condensible(self) -> bool {
        self.index() >= Component::D.index()
    }
}
