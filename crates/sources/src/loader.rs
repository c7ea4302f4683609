use indexmap::IndexMap;
use models::{CliOptions, Document, Locals, MetricMap, ResourceKind, TopicConfig};

use crate::Merge;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to parse configuration document")]
    Parse(#[from] serde_yaml::Error),
}

/// Store holds one parsed configuration document and resolves its layered
/// defaults into per-resource configurations.
///
/// A Store is immutable once loaded: resolved configurations are derived
/// from its document on demand and are never cached, so they cannot go
/// stale. Callers own the Store and pass it by reference, which keeps
/// distinct configurations independent (as in tests running in parallel).
#[derive(Debug)]
pub struct Store {
    document: Document,
}

impl Store {
    /// Parse a complete configuration document.
    /// A malformed document fails as a whole: there are no partial loads.
    pub fn from_yaml(text: &str) -> Result<Self, LoadError> {
        let document = serde_yaml::from_str(text)?;
        Ok(Self { document })
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cli(&self) -> Option<&CliOptions> {
        self.document.cli.as_ref()
    }

    /// Notification topics, keyed by channel name.
    pub fn topics(&self) -> &IndexMap<String, TopicConfig> {
        &self.document.custom.sns_topics
    }

    /// Default metric template of the given kind, if the document has one.
    pub fn defaults(&self, kind: ResourceKind) -> Option<&MetricMap> {
        self.document.custom.default.get(kind.defaults_key())
    }

    /// All declared resources of the given kind, with the kind's default
    /// template deep-merged into each declaration. Declaration order is
    /// preserved. A kind without defaults yields the raw declarations.
    pub fn all_locals(&self, kind: ResourceKind) -> Locals {
        let Some(section) = self.document.section(kind) else {
            return Locals::new();
        };
        let Some(defaults) = self.defaults(kind) else {
            return section.clone();
        };
        section
            .iter()
            .map(|(id, local)| (id.clone(), Merge::merge(defaults, local)))
            .collect()
    }

    /// A single declared resource of the given kind, resolved as in
    /// [`Store::all_locals`].
    pub fn single_local(&self, kind: ResourceKind, id: &str) -> Option<MetricMap> {
        let local = self.document.section(kind)?.get(id)?;
        match self.defaults(kind) {
            Some(defaults) => Some(Merge::merge(defaults, local)),
            None => Some(local.clone()),
        }
    }

    /// The declared resources among `ids`, resolved as in
    /// [`Store::all_locals`]. Ids without a declaration are dropped.
    pub fn selected_locals<I, S>(&self, kind: ResourceKind, ids: I) -> Locals
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                self.single_local(kind, id).map(|local| (id.to_string(), local))
            })
            .collect()
    }

    /// The resolved account-level template. The account kind has no
    /// per-resource section: its defaults are its configuration.
    pub fn account_defaults(&self) -> MetricMap {
        self.defaults(ResourceKind::Account).cloned().unwrap_or_default()
    }
}
