//! The per-profile mapping from quorum type to its live parameter record.

use std::collections::BTreeMap;

use osmium_shared_types::{LlmqParams, LlmqType};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LlmqCatalog {
    entries: BTreeMap<LlmqType, LlmqParams>,
}

impl LlmqCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record for `llmq_type`, `None` if the profile does not run it.
    pub fn get(&self, llmq_type: LlmqType) -> Option<&LlmqParams> {
        self.entries.get(&llmq_type)
    }

    pub fn contains(&self, llmq_type: LlmqType) -> bool {
        self.entries.contains_key(&llmq_type)
    }

    /// Installs `params` into `slot`, returning the record it displaced.
    pub fn replace(&mut self, slot: LlmqType, params: LlmqParams) -> Option<LlmqParams> {
        self.entries.insert(slot, params)
    }

    /// Installs `params` under its own type.
    pub fn insert(&mut self, params: LlmqParams) -> Option<LlmqParams> {
        self.replace(params.llmq_type, params)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LlmqType, &LlmqParams)> {
        self.entries.iter().map(|(t, p)| (*t, p))
    }

    /// Whether `height` is inside the commitment mining window of any quorum.
    pub fn is_mining_phase(&self, height: u32) -> bool {
        self.entries.values().any(|p| p.is_mining_phase(height))
    }
}

impl FromIterator<LlmqParams> for LlmqCatalog {
    fn from_iter<I: IntoIterator<Item = LlmqParams>>(iter: I) -> Self {
        let mut catalog = LlmqCatalog::new();
        for params in iter {
            catalog.insert(params);
        }
        catalog
    }
}

impl Serialize for LlmqCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}
