//! Carrier Directory
//!
//! Maps dialing prefixes to destination mobile operators. The directory is
//! defined at process start and never mutated; detection is a synchronous
//! prefix lookup invoked after every normalization event.

use rustc_hash::FxHashMap;

/// A destination mobile operator.
///
/// The styling fields (`color`, `secondary_color`, `logo`) are carried for
/// presentation layers and are not semantically load-bearing. Prefix sets
/// may overlap between carriers; [`CarrierDirectory::detect`] resolves
/// overlaps deterministically by directory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierNetwork {
    pub id: &'static str,
    pub name: &'static str,
    /// Two-digit subscriber prefixes owned by this carrier
    pub prefixes: &'static [&'static str],
    pub color: &'static str,
    pub secondary_color: &'static str,
    pub logo: &'static str,
}

/// Ordered carrier lookup table.
///
/// Directory order is significant: when a candidate prefix appears in more
/// than one carrier's set, the first carrier in the directory wins.
#[derive(Debug, Clone)]
pub struct CarrierDirectory {
    carriers: Vec<CarrierNetwork>,
    id_to_index: FxHashMap<&'static str, usize>,
}

impl CarrierDirectory {
    pub fn new(carriers: Vec<CarrierNetwork>) -> Self {
        let id_to_index = carriers
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        Self {
            carriers,
            id_to_index,
        }
    }

    /// The five Afghan operators, in canonical directory order.
    ///
    /// Etisalat and MTN both list `77`; first match wins, so `77`
    /// resolves to Etisalat.
    pub fn afghan() -> Self {
        Self::new(vec![
            CarrierNetwork {
                id: "roshan",
                name: "Roshan",
                prefixes: &["79", "72"],
                color: "#e11d48",
                secondary_color: "#9f1239",
                logo: "R",
            },
            CarrierNetwork {
                id: "etisalat",
                name: "Etisalat",
                prefixes: &["78", "77"],
                color: "#059669",
                secondary_color: "#064e3b",
                logo: "E",
            },
            CarrierNetwork {
                id: "awcc",
                name: "AWCC",
                prefixes: &["70", "71"],
                color: "#f97316",
                secondary_color: "#9a3412",
                logo: "A",
            },
            CarrierNetwork {
                id: "mtn",
                name: "MTN",
                prefixes: &["76", "77"],
                color: "#facc15",
                secondary_color: "#a16207",
                logo: "M",
            },
            CarrierNetwork {
                id: "salam",
                name: "Salam",
                prefixes: &["74"],
                color: "#2563eb",
                secondary_color: "#1e3a8a",
                logo: "S",
            },
        ])
    }

    /// Resolve the owning carrier for a normalized digit string.
    ///
    /// Takes the first two digits as the candidate prefix and returns the
    /// first carrier in directory order whose prefix set contains it.
    /// Numbers shorter than two digits never match, and input that is not
    /// a plain digit string simply misses. A miss is not an error; the
    /// caller decides what to do with the absence (the wizard leaves any
    /// previously detected carrier in place).
    pub fn detect(&self, number: &str) -> Option<&CarrierNetwork> {
        let candidate = number.get(..2)?;
        self.carriers
            .iter()
            .find(|c| c.prefixes.contains(&candidate))
    }

    /// Look up a carrier by its directory id.
    pub fn get(&self, id: &str) -> Option<&CarrierNetwork> {
        self.id_to_index.get(id).map(|&i| &self.carriers[i])
    }

    /// All carriers in directory order.
    pub fn carriers(&self) -> &[CarrierNetwork] {
        &self.carriers
    }
}

impl Default for CarrierDirectory {
    fn default() -> Self {
        Self::afghan()
    }
}
