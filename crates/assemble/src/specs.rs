use indexmap::IndexMap;
use models::{ComparisonOperator, MetricUnit, ResourceKind, Statistic, TreatMissingData};
use serde::Serialize;

/// AlarmSpec is one fully-resolved metric alarm, ready to deploy:
/// every inheritable option has been merged and defaulted, and its
/// notification targets are concrete topic ids.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlarmSpec {
    pub alarm_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub namespace: String,
    pub metric_name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dimensions: IndexMap<String, String>,
    pub statistic: Statistic,
    pub period_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<MetricUnit>,
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub comparison_operator: ComparisonOperator,
    pub treat_missing_data: TreatMissingData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluate_low_sample_count_percentile: Option<String>,
    pub actions_enabled: bool,
    /// Topic ids notified when the alarm fires.
    pub alarm_topics: Vec<String>,
    /// Topic ids notified when the alarm returns to OK.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ok_topics: Vec<String>,
}

/// MetricFilterSpec extracts a log group's metric from matched log events.
/// Each monitored log-group metric deploys one filter alongside its alarms.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricFilterSpec {
    pub filter_name: String,
    pub log_group: String,
    pub pattern: String,
    pub metric_namespace: String,
    pub metric_name: String,
    pub metric_value: String,
    pub default_value: f64,
}

/// StackSpec is one deployable unit: the alarms (and, for log groups,
/// metric filters) of one partition group.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackSpec {
    pub name: String,
    pub kind: ResourceKind,
    pub alarms: Vec<AlarmSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric_filters: Vec<MetricFilterSpec>,
}

impl StackSpec {
    /// Count of platform resources this stack deploys.
    pub fn resource_count(&self) -> usize {
        self.alarms.len() + self.metric_filters.len()
    }
}
