use indexmap::IndexMap;
use models::{
    ComparisonOperator, Locals, MetricAlarm, MetricDuration, MetricMap, ResourceKind, Statistic,
    TopicConfig, TreatMissingData,
};

use crate::{AlarmSpec, Error, MetricFilterSpec, StackSpec};

/// Assemble the alarms of one resolved (resource, metric) pair: one
/// AlarmSpec per active channel. Absent options are defaulted here, at the
/// edge of the platform vocabulary, and nowhere else.
///
/// An active channel which cannot be built (no threshold, or no evaluation
/// periods) is skipped with a warning, keeping the remaining coverage
/// deployable. A channel naming an undeclared notification topic fails
/// instead: an alarm without a delivery target is a silent monitoring gap.
pub fn metric_alarms(
    kind: ResourceKind,
    resource_id: &str,
    metric_name: &str,
    config: &MetricAlarm,
    topics: &IndexMap<String, TopicConfig>,
) -> Result<Vec<AlarmSpec>, Error> {
    if !validation::is_enabled(config) {
        return Ok(Vec::new());
    }

    let metric = config.metric.clone().unwrap_or_default();
    let period = match &metric.period {
        Some(period) => period.resolve().map_err(|detail| Error::Period {
            resource: resource_id.to_string(),
            metric: metric_name.to_string(),
            detail,
        })?,
        None => MetricDuration::default_period(),
    };
    let statistic = metric.statistic.unwrap_or(Statistic::Average);

    // Custom metrics extracted by a filter carry no unit: setting one would
    // sever the alarm from its metric stream.
    let unit = match kind {
        ResourceKind::LogGroup => None,
        _ => metric.unit,
    };
    let spec_metric_name = match kind {
        ResourceKind::LogGroup => format!("{resource_id}-{metric_name}"),
        _ => metric_name.to_string(),
    };

    let mut dimensions = metric.dimensions.clone();
    if let Some(key) = kind.dimension_key() {
        dimensions.insert(key.to_string(), resource_id.to_string());
    }

    let auto_resolve = validation::auto_resolve(config);
    let mut out = Vec::new();

    for (channel, options) in validation::active_channels(config) {
        match validation::check_channel(resource_id, metric_name, channel, options, topics) {
            Ok(()) => {}
            Err(err @ validation::Error::UnknownChannel { .. }) => return Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, "skipping alarm channel");
                continue;
            }
        }
        let topic_id = topics[channel].id.clone();

        out.push(AlarmSpec {
            alarm_name: format!("{resource_id}-{metric_name}-{channel}"),
            description: options.description.clone(),
            namespace: kind.namespace().to_string(),
            metric_name: spec_metric_name.clone(),
            dimensions: dimensions.clone(),
            statistic: statistic.clone(),
            period_seconds: period.as_secs(),
            unit,
            threshold: options.threshold.unwrap(),
            evaluation_periods: options.evaluation_periods.unwrap(),
            comparison_operator: options
                .comparison_operator
                .unwrap_or(ComparisonOperator::GreaterThanOrEqualToThreshold),
            treat_missing_data: options
                .treat_missing_data
                .unwrap_or(TreatMissingData::NotBreaching),
            evaluate_low_sample_count_percentile: options
                .evaluate_low_sample_count_percentile
                .clone(),
            actions_enabled: true,
            alarm_topics: vec![topic_id.clone()],
            ok_topics: if auto_resolve { vec![topic_id] } else { Vec::new() },
        });
    }
    Ok(out)
}

/// Assemble the metric filter of one enabled log-group metric.
/// A filter without a pattern cannot match anything and yields None.
pub fn metric_filter(group: &str, metric_name: &str, config: &MetricAlarm) -> Option<MetricFilterSpec> {
    let pattern = config.filter.as_ref()?.pattern.clone()?;
    let name = format!("{group}-{metric_name}");
    Some(MetricFilterSpec {
        filter_name: name.clone(),
        log_group: group.to_string(),
        pattern,
        metric_namespace: ResourceKind::LogGroup.namespace().to_string(),
        metric_name: name,
        metric_value: "1".to_string(),
        default_value: 0.0,
    })
}

/// Assemble one deployable stack from a partition group of resolved
/// resources. Metrics are walked in the kind's vocabulary order when it
/// has one, and in declaration order otherwise (log groups).
pub fn assemble_stack(
    kind: ResourceKind,
    name: &str,
    group: &Locals,
    topics: &IndexMap<String, TopicConfig>,
) -> Result<StackSpec, Error> {
    let mut stack = StackSpec {
        name: name.to_string(),
        kind,
        alarms: Vec::new(),
        metric_filters: Vec::new(),
    };

    for (resource_id, metrics) in group {
        for (metric_name, config) in in_vocabulary_order(kind, metrics) {
            if kind == ResourceKind::LogGroup && validation::is_enabled(config) {
                match metric_filter(resource_id, metric_name, config) {
                    Some(filter) => stack.metric_filters.push(filter),
                    None => {
                        tracing::warn!(
                            resource = %resource_id,
                            metric = %metric_name,
                            "skipping log-group metric without a filter pattern"
                        );
                        continue;
                    }
                }
            }
            stack
                .alarms
                .extend(metric_alarms(kind, resource_id, metric_name, config, topics)?);
        }
    }
    Ok(stack)
}

/// Assemble the account-level stack from the account defaults template.
pub fn assemble_account_stack(
    name: &str,
    defaults: &MetricMap,
    topics: &IndexMap<String, TopicConfig>,
) -> Result<StackSpec, Error> {
    let mut stack = StackSpec {
        name: name.to_string(),
        kind: ResourceKind::Account,
        alarms: Vec::new(),
        metric_filters: Vec::new(),
    };
    for (metric_name, config) in in_vocabulary_order(ResourceKind::Account, defaults) {
        stack.alarms.extend(metric_alarms(
            ResourceKind::Account,
            "account",
            metric_name,
            config,
            topics,
        )?);
    }
    Ok(stack)
}

fn in_vocabulary_order<'m>(
    kind: ResourceKind,
    metrics: &'m MetricMap,
) -> Box<dyn Iterator<Item = (&'m String, &'m MetricAlarm)> + 'm> {
    let vocabulary = kind.metrics();
    if vocabulary.is_empty() {
        return Box::new(metrics.iter());
    }
    Box::new(
        vocabulary
            .iter()
            .filter_map(move |name| metrics.get_key_value(*name)),
    )
}
