//! Fluent construction of an [`OntologyStore`].
//!
//! Every method accepts full IRIs or OBO CURIEs (`GO:0005634`). Objects
//! referenced before they are declared get a placeholder node which the
//! first explicit declaration upgrades.

use owlsim_core::errors::GraphError;
use owlsim_core::model::{LogicalDefinition, ObjectKind, Predicate, Restriction};
use owlsim_core::types::{iri_from_identifier, IriInterner, ObjectId, SmallVec4};
use petgraph::stable_graph::NodeIndex;
use tracing::warn;

use crate::store::{OntologyStore, StoreData};

pub struct OntologyBuilder {
    interner: IriInterner,
    data: StoreData,
    conflicts: Vec<GraphError>,
}

impl OntologyBuilder {
    pub fn new() -> Self {
        Self {
            interner: IriInterner::new(),
            data: StoreData::default(),
            conflicts: Vec::new(),
        }
    }

    fn node(&mut self, iri_or_curie: &str, kind: ObjectKind, declare: bool) -> (ObjectId, NodeIndex) {
        let id = self.interner.intern(&iri_from_identifier(iri_or_curie));
        match self.data.ensure_node(&self.interner, id, kind, declare) {
            Ok(idx) => (id, idx),
            Err(e) => {
                self.conflicts.push(e);
                (id, self.data.node_index[&id])
            }
        }
    }

    /// Declare a named class.
    pub fn class(&mut self, iri: &str, label: &str) -> &mut Self {
        let (id, _) = self.node(iri, ObjectKind::Class, true);
        self.set_label(id, label);
        self
    }

    /// Declare an object property.
    pub fn property(&mut self, iri: &str, label: &str, transitive: bool) -> &mut Self {
        let (id, _) = self.node(iri, ObjectKind::Property, true);
        self.set_label(id, label);
        if transitive {
            self.data.transitive.insert(id);
        }
        self
    }

    /// Declare a named individual.
    pub fn individual(&mut self, iri: &str, label: &str) -> &mut Self {
        let (id, _) = self.node(iri, ObjectKind::Individual, true);
        self.set_label(id, label);
        self
    }

    /// `sub SubClassOf sup`.
    pub fn subclass(&mut self, sub: &str, sup: &str) -> &mut Self {
        let (_, s) = self.node(sub, ObjectKind::Class, false);
        let (_, t) = self.node(sup, ObjectKind::Class, false);
        self.data.add_edge(s, Predicate::SubClassOf, t);
        self
    }

    /// `class SubClassOf (property some filler)`.
    pub fn some(&mut self, class: &str, property: &str, filler: &str) -> &mut Self {
        let (_, s) = self.node(class, ObjectKind::Class, false);
        let (p, _) = self.node(property, ObjectKind::Property, false);
        let (_, t) = self.node(filler, ObjectKind::Class, false);
        self.data.add_edge(s, Predicate::Some(p), t);
        self
    }

    /// Class assertion `individual Type class`.
    pub fn instance_of(&mut self, individual: &str, class: &str) -> &mut Self {
        let (_, s) = self.node(individual, ObjectKind::Individual, false);
        let (_, t) = self.node(class, ObjectKind::Class, false);
        self.data.add_edge(s, Predicate::InstanceOf, t);
        self
    }

    /// Property assertion from an individual. Used for annotations such as
    /// `gene has_phenotype HP:0001250`; the target is treated as a class
    /// unless declared otherwise.
    pub fn fact(&mut self, individual: &str, property: &str, target: &str) -> &mut Self {
        let (_, s) = self.node(individual, ObjectKind::Individual, false);
        let (p, _) = self.node(property, ObjectKind::Property, false);
        let (_, t) = self.node(target, ObjectKind::Class, false);
        self.data.add_edge(s, Predicate::Some(p), t);
        self
    }

    /// `class EquivalentTo genus and (p some f) ...`. The necessary
    /// conditions are also asserted as edges.
    pub fn definition(&mut self, class: &str, genus: &[&str], differentia: &[(&str, &str)]) -> &mut Self {
        let (id, _) = self.node(class, ObjectKind::Class, false);
        let mut genus_ids: SmallVec4<ObjectId> = SmallVec4::new();
        for g in genus {
            self.subclass(class, g);
            genus_ids.push(self.interner.intern(&iri_from_identifier(g)));
        }
        let mut restrictions: SmallVec4<Restriction> = SmallVec4::new();
        for (property, filler) in differentia {
            self.some(class, property, filler);
            restrictions.push(Restriction {
                property: self.interner.intern(&iri_from_identifier(property)),
                filler: self.interner.intern(&iri_from_identifier(filler)),
            });
        }
        let definition = LogicalDefinition {
            genus: genus_ids,
            differentia: restrictions,
        }
        .canonical();
        self.data.definitions.insert(id, definition);
        self
    }

    /// Add an object to a named subset.
    pub fn subset(&mut self, object: &str, name: &str) -> &mut Self {
        let (id, _) = self.node(object, ObjectKind::Class, false);
        self.data
            .subsets
            .entry(name.to_string())
            .or_default()
            .insert(id);
        self
    }

    fn set_label(&mut self, id: ObjectId, label: &str) {
        if !label.is_empty() {
            self.data.labels.insert(id, label.to_string());
        }
    }

    /// Finish, failing on the first kind conflict.
    pub fn try_build(mut self) -> Result<OntologyStore, GraphError> {
        if !self.conflicts.is_empty() {
            return Err(self.conflicts.swap_remove(0));
        }
        Ok(OntologyStore::from_parts(self.interner, self.data))
    }

    /// Finish, logging kind conflicts. The first declaration of a conflicting
    /// object wins.
    pub fn build(&mut self) -> OntologyStore {
        for conflict in self.conflicts.drain(..) {
            warn!(error = %conflict, "ignoring conflicting declaration");
        }
        let interner = std::mem::take(&mut self.interner);
        let data = std::mem::take(&mut self.data);
        OntologyStore::from_parts(interner, data)
    }
}

impl Default for OntologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
