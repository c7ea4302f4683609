use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::MetricOptions;

/// MetricMap configures the alarms of one monitored resource,
/// keyed by metric name.
pub type MetricMap = IndexMap<String, MetricAlarm>;

/// MetricAlarm configures the alarms raised for a single metric of a single
/// monitored resource. It appears both as a per-kind default template entry
/// and as a per-resource override, and the two are deep-merged before use.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "MetricAlarm::example")]
pub struct MetricAlarm {
    /// # Whether alarms of this metric are created.
    /// When absent, enablement is inherited: an absent value behaves as true.
    /// An explicit false disables the metric, unless a channel below
    /// re-enables itself explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// # Whether a transition back to OK also notifies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_resolve: Option<bool>,
    /// # Alarm channels of this metric, keyed by notification channel name.
    /// Each key must name a topic declared under `custom.snsTopics`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alarm: IndexMap<String, AlarmOptions>,
    /// # Aggregation options of the underlying metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricOptions>,
    /// # Log metric-filter options.
    /// Consulted only for log-group resources, which alarm over a metric
    /// extracted from matched log events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterOptions>,
}

impl MetricAlarm {
    pub fn example() -> Self {
        serde_json::from_value(serde_json::json!({
            "enabled": true,
            "alarm": {
                "critical": {
                    "threshold": 10,
                    "evaluationPeriods": 1,
                }
            },
            "metric": {
                "period": {"minutes": 5},
                "statistic": "Sum",
            },
        }))
        .unwrap()
    }
}

/// AlarmOptions configures one alarm channel of a metric:
/// the breach condition, and how missing data is treated.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AlarmOptions {
    /// # Whether this channel's alarm is created.
    /// Absent inherits the metric-level enablement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// # Description attached to the alarm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Value against which the metric statistic is compared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// # Number of periods compared to the threshold before alarming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_periods: Option<u32>,
    /// # Comparison applied between the statistic and the threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_operator: Option<ComparisonOperator>,
    /// # How the alarm treats periods with missing data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_missing_data: Option<TreatMissingData>,
    /// # Percentile evaluation of statistically insignificant periods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate_low_sample_count_percentile: Option<String>,
}

/// FilterOptions configures the metric filter which extracts a log group's
/// metric from its matched log events.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FilterOptions {
    /// # Filter pattern matched against log events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

string_vocabulary!(
    /// Comparison applied between a metric statistic and an alarm threshold.
    ComparisonOperator,
    "comparison operator",
    {
        GreaterThanOrEqualToThreshold => "GreaterThanOrEqualToThreshold",
            ["greater_than_or_equal_to_threshold", "greaterthanorequaltothreshold", ">=", "gte"],
        GreaterThanThreshold => "GreaterThanThreshold",
            ["greater_than_threshold", "greaterthanthreshold", ">", "gt"],
        LessThanThreshold => "LessThanThreshold",
            ["less_than_threshold", "lessthanthreshold", "<", "lt"],
        LessThanOrEqualToThreshold => "LessThanOrEqualToThreshold",
            ["less_than_or_equal_to_threshold", "lessthanorequaltothreshold", "<=", "lte"],
    }
);

string_vocabulary!(
    /// Treatment of evaluation periods which have no metric data.
    TreatMissingData,
    "missing-data policy",
    {
        Breaching => "breaching", ["breaching"],
        NotBreaching => "notBreaching", ["not_breaching", "notbreaching"],
        Ignore => "ignore", ["ignore"],
        Missing => "missing", ["missing"],
    }
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_operator_spellings() {
        for accepted in [
            "GREATER_THAN_OR_EQUAL_TO_THRESHOLD",
            "GreaterThanOrEqualToThreshold",
            ">=",
            "gte",
        ] {
            assert_eq!(
                accepted.parse::<ComparisonOperator>().unwrap(),
                ComparisonOperator::GreaterThanOrEqualToThreshold,
            );
        }
        assert_eq!(
            "lt".parse::<ComparisonOperator>().unwrap(),
            ComparisonOperator::LessThanThreshold
        );

        let err = "sideways".parse::<ComparisonOperator>().unwrap_err();
        assert_eq!(
            err.to_string(),
            r#""sideways" is not a valid comparison operator"#
        );
    }

    #[test]
    fn test_missing_data_spellings() {
        assert_eq!(
            "NOT_BREACHING".parse::<TreatMissingData>().unwrap(),
            TreatMissingData::NotBreaching
        );
        assert_eq!(TreatMissingData::NotBreaching.to_string(), "notBreaching");
        assert!("sometimes".parse::<TreatMissingData>().is_err());
    }

    #[test]
    fn test_malformed_operator_fails_document_parse() {
        let err = serde_yaml::from_str::<MetricAlarm>(
            r#"
alarm:
  critical:
    threshold: 10
    evaluationPeriods: 2
    comparisonOperator: wayward
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a valid comparison operator"));
    }

    #[test]
    fn test_alarm_round_trip() {
        let model: MetricAlarm = serde_yaml::from_str(
            r#"
enabled: false
autoResolve: true
alarm:
  critical:
    enabled: true
    threshold: 99.5
    evaluationPeriods: 3
    comparisonOperator: '>='
    treatMissingData: IGNORE
metric:
  period:
    minutes: 15
  statistic: p99.9
  unit: MILLISECONDS
"#,
        )
        .unwrap();

        insta::assert_json_snapshot!(model, @r###"
        {
          "enabled": false,
          "autoResolve": true,
          "alarm": {
            "critical": {
              "enabled": true,
              "threshold": 99.5,
              "evaluationPeriods": 3,
              "comparisonOperator": "GreaterThanOrEqualToThreshold",
              "treatMissingData": "ignore"
            }
          },
          "metric": {
            "period": {
              "minutes": 15
            },
            "statistic": "p99.9",
            "unit": "Milliseconds"
          }
        }
        "###);
    }
}
