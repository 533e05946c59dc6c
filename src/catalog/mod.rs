use std::collections::HashMap;

use tracing::{info, warn};

use crate::core::approach::{CloseApproach, LinkedApproach, NeoId};
use crate::core::error::ModelError;
use crate::core::neo::NearEarthObject;

/// Objects indexed by designation and name, with their approaches attached.
#[derive(Debug, Default)]
pub struct Catalog {
    neos: Vec<NearEarthObject>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    unlinked: Vec<CloseApproach>,
}

impl Catalog {
    /// Runs the single linking pass over independently built records.
    ///
    /// Each approach gets its owner's handle and is appended to the owner in
    /// input order. Approaches whose designation matches no object are kept
    /// aside, unlinked. A repeated designation keeps the first object.
    pub fn link(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Result<Self, ModelError> {
        let mut catalog = Catalog::default();
        for neo in neos {
            if catalog.by_designation.contains_key(neo.designation()) {
                warn!(designation = neo.designation(), "Skipping duplicate designation");
                continue;
            }
            let id = NeoId(catalog.neos.len());
            catalog.by_designation.insert(neo.designation().to_string(), id);
            if let Some(name) = neo.name() {
                catalog.by_name.entry(name.to_string()).or_insert(id);
            }
            catalog.neos.push(neo);
        }

        let total = approaches.len();
        for mut approach in approaches {
            match catalog.by_designation.get(approach.designation()).copied() {
                Some(id) => {
                    approach.set_neo(id)?;
                    catalog.neos[id.0].append(approach)?;
                }
                None => {
                    warn!(designation = approach.designation(), "Approach has no matching object");
                    catalog.unlinked.push(approach);
                }
            }
        }

        info!(
            neos = catalog.neos.len(),
            approaches = total,
            unlinked = catalog.unlinked.len(),
            "Linked catalog"
        );
        Ok(catalog)
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation.get(designation).and_then(|id| self.neo(*id))
    }

    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).and_then(|id| self.neo(*id))
    }

    /// Owner of a linked approach; `None` before linking.
    pub fn neo_of(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo().and_then(|id| self.neo(id))
    }

    /// Approaches with no matching object.
    pub fn unlinked(&self) -> &[CloseApproach] {
        &self.unlinked
    }

    /// Every linked approach, grouped by object in catalog order.
    pub fn approaches(&self) -> impl Iterator<Item = &CloseApproach> {
        self.neos.iter().flat_map(|neo| neo.approaches())
    }

    pub fn describe<'a>(&'a self, approach: &'a CloseApproach) -> Result<LinkedApproach<'a>, ModelError> {
        let neo = self.neo_of(approach).ok_or_else(|| {
            ModelError::Precondition(format!(
                "approach of {} at {} has no owner in this catalog",
                approach.designation(),
                approach.time_str()
            ))
        })?;
        approach.describe(neo)
    }
}
