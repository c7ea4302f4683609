use indexmap::IndexMap;
use models::{Locals, MetricMap};

/// Count the deployable-unit slots each resource's alarms will consume:
/// one per active channel of every enabled metric, plus `extra_per_resource`
/// once per resource for fixed infrastructure its monitoring always deploys.
///
/// Resources with no enabled metric (restricted to `allowed_metrics` when
/// given) are excluded from the result entirely. Declaration order is
/// preserved: the partitioner's group assignment follows it.
pub fn count_resource_units(
    locals: &Locals,
    allowed_metrics: Option<&[&str]>,
    extra_per_resource: u32,
) -> IndexMap<String, (u32, MetricMap)> {
    let mut out = IndexMap::new();

    for (id, metrics) in locals {
        let mut units = 0;
        let mut any_enabled = false;

        for (metric, config) in metrics {
            let allowed = match allowed_metrics {
                Some(allowed) => allowed.contains(&metric.as_str()),
                None => true,
            };
            if !allowed || !validation::is_enabled(config) {
                continue;
            }
            any_enabled = true;
            units += validation::active_channels(config).count() as u32;
        }

        if any_enabled {
            out.insert(id.clone(), (units + extra_per_resource, metrics.clone()));
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn locals(yaml: &str) -> Locals {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_units_are_channels_plus_overhead() {
        let locals = locals(
            r#"
service-logs:
  ErrorLogged:
    enabled: true
    alarm:
      critical: {threshold: 1, evaluationPeriods: 1}
  PanicLogged:
    enabled: true
    alarm:
      critical: {threshold: 1, evaluationPeriods: 1}
"#,
        );
        // Two enabled metrics with one channel each, plus one fixed unit.
        let costs = count_resource_units(&locals, None, 1);
        assert_eq!(costs["service-logs"].0, 3);
    }

    #[test]
    fn test_disabled_resources_are_excluded() {
        let locals = locals(
            r#"
lambda-1:
  Errors:
    enabled: true
    alarm:
      critical: {threshold: 1, evaluationPeriods: 1}
      warning: {threshold: 1, evaluationPeriods: 1}
lambda-2:
  Errors:
    enabled: false
"#,
        );
        let costs = count_resource_units(&locals, Some(&["Errors"]), 0);
        assert_eq!(costs.keys().collect::<Vec<_>>(), vec!["lambda-1"]);
        assert_eq!(costs["lambda-1"].0, 2);
    }

    #[test]
    fn test_metrics_outside_the_vocabulary_are_ignored() {
        let locals = locals(
            r#"
lambda-1:
  NotALambdaMetric:
    enabled: true
    alarm:
      critical: {threshold: 1, evaluationPeriods: 1}
"#,
        );
        let costs = count_resource_units(&locals, Some(&["Errors"]), 0);
        assert!(costs.is_empty());
    }
}
