use indexmap::IndexMap;
use models::{AlarmOptions, Locals, MetricAlarm, ResourceKind, TopicConfig};
use sources::Store;

mod errors;
pub use errors::Error;

/// Whether alarms of this resolved metric configuration are created.
///
/// The rule is asymmetric. A metric is enabled unless it explicitly sets
/// `enabled: false`; an absent value behaves as true. When the metric is
/// explicitly disabled, a channel which explicitly sets `enabled: true`
/// re-enables it: channels can add exceptions to a disabled metric, but
/// cannot disable an enabled one.
pub fn is_enabled(config: &MetricAlarm) -> bool {
    if config.enabled != Some(false) {
        return true;
    }
    config.alarm.values().any(|channel| channel.enabled == Some(true))
}

/// Whether a transition back to OK also notifies.
/// Unlike enablement, auto-resolve is opt-in: it must be set explicitly.
pub fn auto_resolve(config: &MetricAlarm) -> bool {
    config.auto_resolve == Some(true)
}

/// Whether one alarm channel of a resolved metric configuration is active.
/// Channels of an enabled metric are active unless they opt out; channels
/// of a disabled metric are active only when they opt in.
pub fn channel_is_active(config: &MetricAlarm, channel: &AlarmOptions) -> bool {
    if config.enabled == Some(false) {
        channel.enabled == Some(true)
    } else {
        channel.enabled != Some(false)
    }
}

/// The active channels of a resolved metric configuration,
/// in declaration order.
pub fn active_channels<'c>(
    config: &'c MetricAlarm,
) -> impl Iterator<Item = (&'c String, &'c AlarmOptions)> {
    config
        .alarm
        .iter()
        .filter(|(_, channel)| channel_is_active(config, channel))
}

/// The declared resources of `kind` for which at least one metric resolves
/// as enabled, restricted to `metrics` when given. Resources with nothing
/// enabled are dropped entirely; declaration order is preserved.
pub fn enabled_locals(store: &Store, kind: ResourceKind, metrics: Option<&[&str]>) -> Locals {
    store
        .all_locals(kind)
        .into_iter()
        .filter(|(_, local)| {
            local.iter().any(|(metric, config)| {
                let allowed = match metrics {
                    Some(metrics) => metrics.contains(&metric.as_str()),
                    None => true,
                };
                allowed && is_enabled(config)
            })
        })
        .collect()
}

/// Check one active channel of a resolved metric configuration: it must
/// reference a declared notification topic and carry the fields an alarm
/// cannot be built without.
pub fn check_channel(
    resource: &str,
    metric: &str,
    channel: &str,
    options: &AlarmOptions,
    topics: &IndexMap<String, TopicConfig>,
) -> Result<(), Error> {
    if !topics.contains_key(channel) {
        return Err(Error::UnknownChannel {
            resource: resource.to_string(),
            metric: metric.to_string(),
            channel: channel.to_string(),
        });
    }
    if options.threshold.is_none() {
        return Err(Error::MissingThreshold {
            resource: resource.to_string(),
            metric: metric.to_string(),
            channel: channel.to_string(),
        });
    }
    if options.evaluation_periods.is_none() {
        return Err(Error::MissingEvaluationPeriods {
            resource: resource.to_string(),
            metric: metric.to_string(),
            channel: channel.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(yaml: &str) -> MetricAlarm {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_enablement_precedence() {
        // Explicit and inherited enablement.
        assert!(is_enabled(&config("enabled: true")));
        assert!(is_enabled(&config("{}")));
        assert!(!is_enabled(&config("enabled: false")));

        // A channel re-enables a disabled metric.
        assert!(is_enabled(&config(
            "{enabled: false, alarm: {critical: {enabled: true}}}"
        )));
        // But cannot disable an enabled one.
        assert!(is_enabled(&config(
            "{enabled: true, alarm: {critical: {enabled: false}}}"
        )));
        // A disabled channel of a disabled metric stays disabled.
        assert!(!is_enabled(&config(
            "{enabled: false, alarm: {critical: {enabled: false}}}"
        )));
    }

    #[test]
    fn test_auto_resolve_is_opt_in() {
        assert!(auto_resolve(&config("autoResolve: true")));
        assert!(!auto_resolve(&config("autoResolve: false")));
        assert!(!auto_resolve(&config("{}")));
    }

    #[test]
    fn test_channel_activity() {
        let c = config(
            r#"
enabled: true
alarm:
  critical: {}
  warning: {enabled: false}
"#,
        );
        let active: Vec<_> = active_channels(&c).map(|(name, _)| name.as_str()).collect();
        assert_eq!(active, vec!["critical"]);

        let c = config(
            r#"
enabled: false
alarm:
  critical: {}
  warning: {enabled: true}
"#,
        );
        let active: Vec<_> = active_channels(&c).map(|(name, _)| name.as_str()).collect();
        assert_eq!(active, vec!["warning"]);
    }

    #[test]
    fn test_enabled_locals_applies_local_override() {
        let store = Store::from_yaml(
            r#"
lambdas:
  lambda-1:
    Errors:
      enabled: true
  lambda-2: {}
custom:
  default:
    lambda:
      Errors:
        enabled: false
        alarm:
          critical:
            threshold: 10
            evaluationPeriods: 1
      Invocations:
        enabled: false
"#,
        )
        .unwrap();

        let enabled = enabled_locals(&store, ResourceKind::Lambda, Some(ResourceKind::Lambda.metrics()));
        assert_eq!(enabled.keys().collect::<Vec<_>>(), vec!["lambda-1"]);
    }

    #[test]
    fn test_check_channel() {
        let mut topics = IndexMap::new();
        topics.insert("critical".to_string(), TopicConfig::default());

        let ok: AlarmOptions =
            serde_yaml::from_str("{threshold: 10, evaluationPeriods: 2}").unwrap();
        assert!(check_channel("r", "m", "critical", &ok, &topics).is_ok());

        assert_eq!(
            check_channel("r", "m", "pager", &ok, &topics),
            Err(Error::UnknownChannel {
                resource: "r".to_string(),
                metric: "m".to_string(),
                channel: "pager".to_string(),
            }),
        );

        let missing: AlarmOptions = serde_yaml::from_str("{evaluationPeriods: 2}").unwrap();
        assert!(matches!(
            check_channel("r", "m", "critical", &missing, &topics),
            Err(Error::MissingThreshold { .. }),
        ));

        let missing: AlarmOptions = serde_yaml::from_str("{threshold: 10}").unwrap();
        assert!(matches!(
            check_channel("r", "m", "critical", &missing, &topics),
            Err(Error::MissingEvaluationPeriods { .. }),
        ));
    }
}
