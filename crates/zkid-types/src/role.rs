use core::fmt;

use serde::{Deserialize, Serialize};

/// Position of a sub-proof in the A → B → C → D chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitRole {
    /// A: document signer certificate check.
    Dsc,
    /// B: ID attribute check.
    IdData,
    /// C: data integrity check.
    Integrity,
    /// D: disclosure check, outputs the scoped nullifier.
    Disclose,
}

impl CircuitRole {
    /// Canonical chain order, also the classification precedence.
    pub const ALL: [CircuitRole; 4] = [
        CircuitRole::Dsc,
        CircuitRole::IdData,
        CircuitRole::Integrity,
        CircuitRole::Disclose,
    ];

    /// Substring searched for in a lowercased circuit name.
    pub fn keyword(self) -> &'static str {
        match self {
            CircuitRole::Dsc => "dsc",
            CircuitRole::IdData => "id_data",
            CircuitRole::Integrity => "integrity",
            CircuitRole::Disclose => "disclose",
        }
    }

    pub fn letter(self) -> char {
        match self {
            CircuitRole::Dsc => 'A',
            CircuitRole::IdData => 'B',
            CircuitRole::Integrity => 'C',
            CircuitRole::Disclose => 'D',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CircuitRole::Dsc => "DSC",
            CircuitRole::IdData => "ID data",
            CircuitRole::Integrity => "integrity",
            CircuitRole::Disclose => "disclosure",
        }
    }

    pub fn index(self) -> usize {
        match self {
            CircuitRole::Dsc => 0,
            CircuitRole::IdData => 1,
            CircuitRole::Integrity => 2,
            CircuitRole::Disclose => 3,
        }
    }

    /// Case-insensitive keyword containment.
    pub fn matches(self, name: &str) -> bool {
        name.to_lowercase().contains(self.keyword())
    }
}

impl fmt::Display for CircuitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Result of classifying a proof by its circuit name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProofKind {
    Circuit(CircuitRole),
    Unknown,
}

impl ProofKind {
    /// First keyword in [`CircuitRole::ALL`] order contained in the name wins.
    /// A missing name is `Unknown`.
    pub fn classify(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return ProofKind::Unknown;
        };
        let lower = name.to_lowercase();
        CircuitRole::ALL
            .into_iter()
            .find(|role| lower.contains(role.keyword()))
            .map(ProofKind::Circuit)
            .unwrap_or(ProofKind::Unknown)
    }

    pub fn role(self) -> Option<CircuitRole> {
        match self {
            ProofKind::Circuit(role) => Some(role),
            ProofKind::Unknown => None,
        }
    }
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofKind::Circuit(role) => role.fmt(f),
            ProofKind::Unknown => f.write_str("unknown"),
        }
    }
}
