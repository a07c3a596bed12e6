use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use super::errors::ProductError;
use crate::domain::shared::value_objects::{VariationAttributeId, VariationSetId};

/// A stored link between a product and one of its variation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationLink {
    pub set_id: VariationSetId,
    pub attribute_id: VariationAttributeId,
}

/// How two variation selections are compared when looking for duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Same sets, and the same attribute chosen for every set.
    #[default]
    KeyWise,
    /// Attribute ids compared as sequences ordered by set id, ignoring which
    /// set each attribute was chosen for. An empty candidate matches any
    /// product with the same name and category.
    SortedValues,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::KeyWise => write!(f, "key_wise"),
            MatchPolicy::SortedValues => write!(f, "sorted_values"),
        }
    }
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key_wise" => Ok(MatchPolicy::KeyWise),
            "sorted_values" => Ok(MatchPolicy::SortedValues),
            _ => Err(format!("Invalid match policy: {}", s)),
        }
    }
}

/// The attribute chosen for each variation set of a product.
///
/// At most one attribute per set; iteration is ordered by set id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationSelection(BTreeMap<VariationSetId, VariationAttributeId>);

impl VariationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from raw form input.
    ///
    /// Sets without a chosen attribute are skipped. A set chosen twice is
    /// rejected.
    pub fn from_choices<I>(choices: I) -> Result<Self, ProductError>
    where
        I: IntoIterator<Item = (VariationSetId, Option<VariationAttributeId>)>,
    {
        let mut map = BTreeMap::new();
        for (set_id, attribute_id) in choices {
            let Some(attribute_id) = attribute_id else {
                continue;
            };
            match map.entry(set_id) {
                Entry::Vacant(slot) => {
                    slot.insert(attribute_id);
                }
                Entry::Occupied(_) => return Err(ProductError::DuplicateVariationSet(set_id)),
            }
        }
        Ok(Self(map))
    }

    /// Rebuilds a selection from stored link records.
    pub fn from_links(links: &[VariationLink]) -> Self {
        Self(
            links
                .iter()
                .map(|link| (link.set_id, link.attribute_id))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, set_id: VariationSetId) -> Option<VariationAttributeId> {
        self.0.get(&set_id).copied()
    }

    pub fn links(&self) -> impl Iterator<Item = VariationLink> + '_ {
        self.0.iter().map(|(set_id, attribute_id)| VariationLink {
            set_id: *set_id,
            attribute_id: *attribute_id,
        })
    }

    pub fn attribute_ids(&self) -> Vec<VariationAttributeId> {
        self.0.values().copied().collect()
    }

    pub fn matches(&self, other: &VariationSelection, policy: MatchPolicy) -> bool {
        match policy {
            MatchPolicy::KeyWise => self.0 == other.0,
            MatchPolicy::SortedValues => self.0.values().eq(other.0.values()),
        }
    }
}
