use indexmap::IndexMap;
use models::{AlarmOptions, FilterOptions, MetricAlarm, MetricDuration, MetricOptions};

/// Merge layers a local override over a default template, producing the
/// resolved value. Maps merge key-wise and recursively, with defaults'
/// declaration order first and local-only keys appended. Scalar and
/// sequence fields set locally replace the default wholesale.
///
/// Merging never mutates either input: both the template and the override
/// are long-lived and consulted by many resources.
pub trait Merge: Sized {
    fn merge(default: &Self, local: &Self) -> Self;
}

fn merge_option<T: Merge + Clone>(default: &Option<T>, local: &Option<T>) -> Option<T> {
    match (default, local) {
        (Some(d), Some(l)) => Some(T::merge(d, l)),
        (None, Some(l)) => Some(l.clone()),
        (d, None) => d.clone(),
    }
}

impl<V: Merge + Clone> Merge for IndexMap<String, V> {
    fn merge(default: &Self, local: &Self) -> Self {
        let mut out = Self::with_capacity(default.len() + local.len());
        for (key, d) in default {
            match local.get(key) {
                Some(l) => out.insert(key.clone(), V::merge(d, l)),
                None => out.insert(key.clone(), d.clone()),
            };
        }
        for (key, l) in local {
            if !out.contains_key(key) {
                out.insert(key.clone(), l.clone());
            }
        }
        out
    }
}

// Leaf values: the local spelling wins outright.
impl Merge for String {
    fn merge(_default: &Self, local: &Self) -> Self {
        local.clone()
    }
}

impl Merge for MetricAlarm {
    fn merge(default: &Self, local: &Self) -> Self {
        Self {
            enabled: local.enabled.or(default.enabled),
            auto_resolve: local.auto_resolve.or(default.auto_resolve),
            alarm: Merge::merge(&default.alarm, &local.alarm),
            metric: merge_option(&default.metric, &local.metric),
            filter: merge_option(&default.filter, &local.filter),
        }
    }
}

impl Merge for AlarmOptions {
    fn merge(default: &Self, local: &Self) -> Self {
        Self {
            enabled: local.enabled.or(default.enabled),
            description: local.description.clone().or_else(|| default.description.clone()),
            threshold: local.threshold.or(default.threshold),
            evaluation_periods: local.evaluation_periods.or(default.evaluation_periods),
            comparison_operator: local.comparison_operator.or(default.comparison_operator),
            treat_missing_data: local.treat_missing_data.or(default.treat_missing_data),
            evaluate_low_sample_count_percentile: local
                .evaluate_low_sample_count_percentile
                .clone()
                .or_else(|| default.evaluate_low_sample_count_percentile.clone()),
        }
    }
}

impl Merge for MetricOptions {
    fn merge(default: &Self, local: &Self) -> Self {
        Self {
            // A locally-set period replaces the default's period wholesale:
            // a merged duration mixing fields of both would change meaning.
            period: merge_leaf(&default.period, &local.period),
            statistic: local.statistic.clone().or_else(|| default.statistic.clone()),
            unit: local.unit.or(default.unit),
            dimensions: Merge::merge(&default.dimensions, &local.dimensions),
            label: local.label.clone().or_else(|| default.label.clone()),
            color: local.color.clone().or_else(|| default.color.clone()),
        }
    }
}

impl Merge for FilterOptions {
    fn merge(default: &Self, local: &Self) -> Self {
        Self {
            pattern: local.pattern.clone().or_else(|| default.pattern.clone()),
        }
    }
}

fn merge_leaf(default: &Option<MetricDuration>, local: &Option<MetricDuration>) -> Option<MetricDuration> {
    local.clone().or_else(|| default.clone())
}

#[cfg(test)]
mod test {
    use super::*;

    fn fixture(yaml: &str) -> MetricAlarm {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_empty_local_is_identity() {
        let default = fixture(
            r#"
enabled: true
alarm:
  critical:
    threshold: 10
    evaluationPeriods: 2
metric:
  period:
    minutes: 5
  statistic: Sum
"#,
        );
        assert_eq!(MetricAlarm::merge(&default, &MetricAlarm::default()), default);
    }

    #[test]
    fn test_merge_is_idempotent_and_pure() {
        let default = fixture(
            r#"
enabled: false
alarm:
  critical:
    threshold: 10
    evaluationPeriods: 2
"#,
        );
        let local = fixture(
            r#"
enabled: true
alarm:
  critical:
    threshold: 25
  warning:
    threshold: 15
    evaluationPeriods: 1
"#,
        );
        let default_before = default.clone();
        let local_before = local.clone();

        let once = MetricAlarm::merge(&default, &local);
        let twice = MetricAlarm::merge(&default, &MetricAlarm::merge(&default, &local));
        assert_eq!(once, twice);

        // Neither input was mutated.
        assert_eq!(default, default_before);
        assert_eq!(local, local_before);
    }

    #[test]
    fn test_local_overrides_at_every_level() {
        let default = fixture(
            r#"
enabled: false
autoResolve: true
alarm:
  critical:
    threshold: 10
    evaluationPeriods: 2
    treatMissingData: NOT_BREACHING
metric:
  period:
    minutes: 5
  statistic: Sum
  unit: COUNT
"#,
        );
        let local = fixture(
            r#"
enabled: true
alarm:
  critical:
    threshold: 50
  warning:
    threshold: 20
    evaluationPeriods: 1
metric:
  period:
    seconds: 60
"#,
        );

        let merged = MetricAlarm::merge(&default, &local);
        insta::assert_json_snapshot!(merged, @r###"
        {
          "enabled": true,
          "autoResolve": true,
          "alarm": {
            "critical": {
              "threshold": 50.0,
              "evaluationPeriods": 2,
              "treatMissingData": "notBreaching"
            },
            "warning": {
              "threshold": 20.0,
              "evaluationPeriods": 1
            }
          },
          "metric": {
            "period": {
              "seconds": 60
            },
            "statistic": "Sum",
            "unit": "Count"
          }
        }
        "###);
    }
}
