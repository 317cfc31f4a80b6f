//! Catalog wire model and translation helpers.
//!
//! Responsibilities:
//! - Define a strict wire model for the YAML catalog format
//! - Translate wire records into validated domain types
//!
//! The wire model only checks shape. Cross-record rules (unique ids, markers on the panel)
//! are enforced by [`crate::validation`] once the domain values exist.

use crate::catalog::{Case, CaseCatalog, MarkerPanel};
use crate::{QuizError, QuizResult};
use pathsim_types::{CaseId, MarkerName};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<Vec<String>>,
    #[serde(default)]
    pub cases: Vec<CaseWire>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CaseWire {
    pub id: String,
    pub category: String,
    pub site: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub symptom: String,
    pub imaging_summary: String,
    pub histology_image: String,
    #[serde(default)]
    pub markers: MarkerResults,
}

/// Marker results keyed by name, kept in the order they were written.
#[derive(Debug, Default)]
pub(crate) struct MarkerResults(pub Vec<(String, String)>);

impl Serialize for MarkerResults {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(name, result)| (name, result)))
    }
}

impl<'de> Deserialize<'de> for MarkerResults {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResultsVisitor;

        impl<'de> Visitor<'de> for ResultsVisitor {
            type Value = MarkerResults;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of marker name to result")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(MarkerResults(entries))
            }
        }

        deserializer.deserialize_map(ResultsVisitor)
    }
}

impl CatalogWire {
    pub(crate) fn parse(yaml: &str) -> QuizResult<Self> {
        serde_yaml::from_str(yaml).map_err(QuizError::CatalogParse)
    }

    pub(crate) fn into_domain(self) -> QuizResult<CaseCatalog> {
        let panel = match self.panel {
            Some(names) => {
                let markers = names
                    .iter()
                    .enumerate()
                    .map(|(index, name)| {
                        MarkerName::new(name).map_err(|e| {
                            QuizError::InvalidCatalog(format!("panel entry #{}: {}", index + 1, e))
                        })
                    })
                    .collect::<QuizResult<Vec<_>>>()?;
                MarkerPanel::new(markers)?
            }
            None => MarkerPanel::hospital(),
        };

        let cases = self
            .cases
            .into_iter()
            .enumerate()
            .map(|(index, case)| case.into_domain(index))
            .collect::<QuizResult<Vec<_>>>()?;

        CaseCatalog::new(panel, cases)
    }
}

impl CaseWire {
    fn into_domain(self, index: usize) -> QuizResult<Case> {
        let id = CaseId::new(&self.id).map_err(|e| {
            QuizError::InvalidCatalog(format!("case #{}: id: {}", index + 1, e))
        })?;

        let mut markers: Vec<(MarkerName, String)> = Vec::with_capacity(self.markers.0.len());
        for (name, result) in self.markers.0 {
            let marker = MarkerName::new(&name).map_err(|e| {
                QuizError::InvalidCatalog(format!("case {}: marker name: {}", id, e))
            })?;
            let result = result.trim();
            if result.is_empty() {
                return Err(QuizError::InvalidCatalog(format!(
                    "case {}: marker {} has an empty result",
                    id, marker
                )));
            }
            if markers.iter().any(|(seen, _)| *seen == marker) {
                return Err(QuizError::InvalidCatalog(format!(
                    "case {}: marker {} listed more than once",
                    id, marker
                )));
            }
            markers.push((marker, result.to_owned()));
        }

        Ok(Case {
            id,
            category: self.category,
            site: self.site,
            name: self.name,
            age: self.age,
            gender: self.gender,
            symptom: self.symptom,
            imaging_summary: self.imaging_summary,
            histology_image: self.histology_image,
            markers,
        })
    }
}

impl From<&Case> for CaseWire {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.to_string(),
            category: case.category.clone(),
            site: case.site.clone(),
            name: case.name.clone(),
            age: case.age.clone(),
            gender: case.gender.clone(),
            symptom: case.symptom.clone(),
            imaging_summary: case.imaging_summary.clone(),
            histology_image: case.histology_image.clone(),
            markers: MarkerResults(
                case.markers
                    .iter()
                    .map(|(marker, result)| (marker.to_string(), result.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<&CaseCatalog> for CatalogWire {
    fn from(catalog: &CaseCatalog) -> Self {
        Self {
            panel: Some(catalog.panel().iter().map(ToString::to_string).collect()),
            cases: catalog.all_cases().iter().map(CaseWire::from).collect(),
        }
    }
}
