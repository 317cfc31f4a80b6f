//! Case catalog and marker panel.
//!
//! The catalog is built once at startup, either from the embedded teaching set or from a
//! YAML file, and is immutable afterwards. It supplies the marker panel the player may order
//! from and the cases a round can draw its hidden target from.

use crate::constants::{BUILTIN_CATALOG_YAML, HOSPITAL_PANEL, NEGATIVE_RESULT};
use crate::validation::validate_catalog;
use crate::wire::CatalogWire;
use crate::{QuizError, QuizResult};
use pathsim_types::{CaseId, MarkerName};
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;

/// One disease profile with its clinical presentation and IHC results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub id: CaseId,
    pub category: String,
    pub site: String,
    /// Diagnosis shown in the differential list.
    pub name: String,
    pub age: String,
    pub gender: String,
    pub symptom: String,
    pub imaging_summary: String,
    /// Opaque reference to the H&E image asset; never loaded by the core.
    pub histology_image: String,
    /// Sparse marker results in authoring order. Panel markers missing here are negative.
    pub markers: Vec<(MarkerName, String)>,
}

impl Case {
    /// Result for `marker`, falling back to [`NEGATIVE_RESULT`] for unlisted markers.
    pub fn marker_result(&self, marker: &str) -> &str {
        self.markers
            .iter()
            .find(|(name, _)| name.as_str() == marker)
            .map(|(_, result)| result.as_str())
            .unwrap_or(NEGATIVE_RESULT)
    }
}

/// Ordered list of markers the player may order, shared by every case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerPanel {
    markers: Vec<MarkerName>,
}

impl MarkerPanel {
    /// Build a panel, rejecting empty panels and repeated markers.
    pub fn new(markers: Vec<MarkerName>) -> QuizResult<Self> {
        if markers.is_empty() {
            return Err(QuizError::InvalidCatalog(
                "marker panel cannot be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for marker in &markers {
            if !seen.insert(marker.as_str()) {
                return Err(QuizError::InvalidCatalog(format!(
                    "marker {} appears more than once in the panel",
                    marker
                )));
            }
        }

        Ok(Self { markers })
    }

    /// The default hospital panel.
    pub fn hospital() -> Self {
        let markers = HOSPITAL_PANEL
            .iter()
            .filter_map(|name| MarkerName::new(name).ok())
            .collect();
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerName> {
        self.markers.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Exact (case-sensitive) lookup.
    pub fn get(&self, name: &str) -> Option<&MarkerName> {
        self.markers.iter().find(|m| m.as_str() == name)
    }

    /// Lookup for typed input: ignores surrounding whitespace and ASCII case.
    pub fn resolve(&self, input: &str) -> Option<&MarkerName> {
        let input = input.trim();
        self.get(input).or_else(|| {
            self.markers
                .iter()
                .find(|m| m.as_str().eq_ignore_ascii_case(input))
        })
    }
}

/// The fixed set of cases plus the marker panel they are scored against.
#[derive(Clone, Debug)]
pub struct CaseCatalog {
    panel: MarkerPanel,
    cases: Vec<Case>,
}

impl CaseCatalog {
    /// Build a catalog after checking its shape.
    ///
    /// An empty case list is accepted here; it only becomes fatal when a round needs a target.
    pub fn new(panel: MarkerPanel, cases: Vec<Case>) -> QuizResult<Self> {
        validate_catalog(&panel, &cases)?;

        for case in cases.iter().filter(|c| c.markers.is_empty()) {
            tracing::warn!("case {} lists no marker results; every test will be negative", case.id);
        }

        Ok(Self { panel, cases })
    }

    /// The embedded T/NK lymphoma teaching set.
    pub fn builtin() -> QuizResult<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG_YAML)
    }

    pub fn from_yaml_str(yaml: &str) -> QuizResult<Self> {
        CatalogWire::parse(yaml)?.into_domain()
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> QuizResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(QuizError::CatalogRead)?;
        let catalog = Self::from_yaml_str(&contents)?;
        tracing::info!(
            "loaded {} cases and {} markers from {}",
            catalog.len(),
            catalog.panel.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Serialise back to the YAML catalog format.
    pub fn to_yaml_string(&self) -> QuizResult<String> {
        serde_yaml::to_string(&CatalogWire::from(self)).map_err(QuizError::CatalogSerialization)
    }

    /// Every case, in authoring order.
    pub fn all_cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn panel(&self) -> &MarkerPanel {
        &self.panel
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id.as_str() == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.id.as_str() == id)
    }

    /// Uniformly random case.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizResult<&Case> {
        let index = self.random_index(rng)?;
        Ok(&self.cases[index])
    }

    pub(crate) fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizResult<usize> {
        if self.cases.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        Ok(rng.gen_range(0..self.cases.len()))
    }
}
