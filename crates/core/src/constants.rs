//! Constants used throughout the PathSim core crate.

/// Tickets granted at the start of every round.
pub const DEFAULT_TICKET_BUDGET: u32 = 8;

/// Result reported for any panel marker a case does not list.
pub const NEGATIVE_RESULT: &str = "Negative (-)";

/// Results containing this character are highlighted as positive.
pub const POSITIVE_SIGN: char = '+';

/// The hospital IHC panel, in display order.
pub const HOSPITAL_PANEL: [&str; 15] = [
    "ALK-1",
    "CD10",
    "CD21",
    "CD30",
    "CD56",
    "Granzyme B",
    "CD4",
    "CD8",
    "EMA",
    "Ki-67",
    "PD-1",
    "Bcl6",
    "CD3",
    "CD20",
    "EBER-ISH",
];

/// Catalog shipped with the binary, used when no catalog file is configured.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../catalog/tnk_lymphoma.yaml");
