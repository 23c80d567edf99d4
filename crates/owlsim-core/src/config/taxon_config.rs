//! Taxon constraint configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaxonConfig {
    /// Relation id for only_in_taxon. Default: RO:0002160.
    pub only_in_taxon_id: Option<String>,
    /// Relation id for never_in_taxon. Default: RO:0002161.
    pub never_in_taxon_id: Option<String>,
    /// Accept a taxon that is an ancestor of an only_in_taxon target. Default: true.
    pub allow_ancestor_taxa: Option<bool>,
}

impl TaxonConfig {
    pub fn effective_only_in_taxon_id(&self) -> &str {
        self.only_in_taxon_id
            .as_deref()
            .unwrap_or(constants::ONLY_IN_TAXON_ID)
    }

    pub fn effective_never_in_taxon_id(&self) -> &str {
        self.never_in_taxon_id
            .as_deref()
            .unwrap_or(constants::NEVER_IN_TAXON_ID)
    }

    pub fn effective_allow_ancestor_taxa(&self) -> bool {
        self.allow_ancestor_taxa.unwrap_or(true)
    }
}
