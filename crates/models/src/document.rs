use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{MetricMap, ResourceKind};

/// Locals are the per-resource overrides of one document section,
/// keyed by resource identifier in declaration order.
pub type Locals = IndexMap<String, MetricMap>;

/// Document is the complete monitoring configuration: per-kind default
/// templates, notification topics, and one section of per-resource
/// overrides for every monitored resource kind.
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Document {
    /// # Invocation options of the command-line driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli: Option<CliOptions>,
    /// # Function overrides, keyed by function name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub lambdas: Locals,
    /// # Table overrides, keyed by table name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tables: Locals,
    /// # Container cluster overrides, keyed by cluster name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub clusters: Locals,
    /// # API route overrides, keyed by API name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub routes: Locals,
    /// # CDN distribution overrides, keyed by distribution id.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub distributions: Locals,
    /// # Database instance overrides, keyed by instance identifier.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub rds_instances: Locals,
    /// # Kubernetes cluster overrides, keyed by cluster name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub eks_clusters: Locals,
    /// # Log group overrides, keyed by log group name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub log_groups: Locals,
    /// # GraphQL API overrides, keyed by API id.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub app_sync_apis: Locals,
    /// # Queue overrides, keyed by queue name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sqs_queues: Locals,
    /// # Default templates and notification topics.
    #[serde(default)]
    pub custom: Custom,
}

impl Document {
    /// Per-resource overrides of the given kind.
    /// The account kind has no per-resource section.
    pub fn section(&self, kind: ResourceKind) -> Option<&Locals> {
        match kind {
            ResourceKind::Lambda => Some(&self.lambdas),
            ResourceKind::Table => Some(&self.tables),
            ResourceKind::Account => None,
            ResourceKind::Cluster => Some(&self.clusters),
            ResourceKind::ApiGateway => Some(&self.routes),
            ResourceKind::Cloudfront => Some(&self.distributions),
            ResourceKind::RdsInstance => Some(&self.rds_instances),
            ResourceKind::EksCluster => Some(&self.eks_clusters),
            ResourceKind::LogGroup => Some(&self.log_groups),
            ResourceKind::AppSyncApi => Some(&self.app_sync_apis),
            ResourceKind::SqsQueue => Some(&self.sqs_queues),
        }
    }
}

/// Custom carries the document's layered defaults and its notification
/// topic declarations.
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Custom {
    /// # Default metric templates, keyed by resource kind.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub default: IndexMap<String, MetricMap>,
    /// # Notification topics, keyed by channel name.
    /// Channel names referenced by alarm configurations must be declared here.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sns_topics: IndexMap<String, TopicConfig>,
}

/// TopicConfig declares one notification topic.
/// Topic delivery resources are built outside of this crate; alarms
/// reference the topic by its id.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TopicConfig {
    /// # Identifier of the topic resource.
    pub id: String,
    /// # Display name of the topic.
    pub name: String,
    /// # Email addresses subscribed to the topic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    /// # HTTPS endpoints subscribed to the topic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
}

/// CliOptions mirror the command-line driver's section of the document.
/// They're parsed and surfaced but not interpreted here.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CliOptions {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_document_sections_cover_all_kinds() {
        let doc = Document::default();
        for kind in ResourceKind::ALL {
            assert_eq!(
                doc.section(*kind).is_none(),
                kind.section_key().is_none(),
                "{kind}",
            );
        }
    }

    #[test]
    fn test_unknown_sections_are_rejected() {
        let err = serde_yaml::from_str::<Document>("buckets: {}").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
