use assemble::{assemble_account_stack, assemble_stack, StackSpec};
use models::{Locals, ResourceKind};
use sources::Store;

use crate::{
    count_resource_units, name_matches, partition, partition_pinned, DeployedGroups, Error,
    Inventory,
};

/// StackBuilder compiles one configuration into deployable monitoring
/// stacks, one resource kind at a time: resolve the enabled resources,
/// partition them under the platform ceiling, and assemble each partition
/// group into a stack of concrete alarm specifications.
pub struct StackBuilder<'s> {
    store: &'s Store,
    prefix: String,
    reserve_one_unit: bool,
}

impl<'s> StackBuilder<'s> {
    pub fn new(store: &'s Store, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            reserve_one_unit: true,
        }
    }

    /// Don't hold back a stack slot for the deployment tool's bookkeeping
    /// resource. Only safe when version reporting is off.
    pub fn without_reserved_unit(mut self) -> Self {
        self.reserve_one_unit = false;
        self
    }

    /// Stacks of the resources the configuration declares for `kind`.
    pub fn declared_stacks(&self, kind: ResourceKind) -> Result<Vec<StackSpec>, Error> {
        let locals = self.store.all_locals(kind);
        self.partitioned_stacks(kind, locals)
    }

    /// Stacks of the resources which exist per the inventory, filtered by
    /// the include/exclude globs. A discovered resource without a local
    /// declaration is monitored by the kind's default template alone.
    pub async fn discovered_stacks(
        &self,
        inventory: &dyn Inventory,
        kind: ResourceKind,
        include: &[String],
        exclude: &[String],
    ) -> Result<Vec<StackSpec>, Error> {
        let locals = self.discovered_locals(inventory, kind, include, exclude).await?;
        self.partitioned_stacks(kind, locals)
    }

    /// Lambda stacks, keeping functions pinned to the stack that already
    /// monitors them in the deployed generation.
    pub async fn lambda_stacks(
        &self,
        inventory: &dyn Inventory,
        deployed: &dyn DeployedGroups,
        include: &[String],
        exclude: &[String],
    ) -> Result<Vec<StackSpec>, Error> {
        let kind = ResourceKind::Lambda;
        let locals = self.discovered_locals(inventory, kind, include, exclude).await?;

        let prefix = format!("{}-{}-alarms", self.prefix, kind.slug());
        let deployed = deployed
            .deployed_groups(&prefix)
            .await
            .map_err(|detail| Error::DeployedGroups { prefix, detail })?;

        let costs =
            count_resource_units(&locals, Some(kind.metrics()), kind.unit_overhead());
        let groups = partition_pinned(costs, &deployed, self.reserve_one_unit);
        self.assembled(kind, groups)
    }

    /// The account-level stack, when any account metric is enabled.
    pub fn account_stack(&self) -> Result<Option<StackSpec>, Error> {
        let kind = ResourceKind::Account;
        let locals = Locals::from_iter([("account".to_string(), self.store.account_defaults())]);
        if count_resource_units(&locals, Some(kind.metrics()), 0).is_empty() {
            return Ok(None);
        }

        let name = format!("{}-{}-alarms", self.prefix, kind.slug());
        let stack =
            assemble_account_stack(&name, &self.store.account_defaults(), self.store.topics())?;
        Ok(Some(stack))
    }

    async fn discovered_locals(
        &self,
        inventory: &dyn Inventory,
        kind: ResourceKind,
        include: &[String],
        exclude: &[String],
    ) -> Result<Locals, Error> {
        let names = inventory
            .list_names(kind)
            .await
            .map_err(|detail| Error::Inventory { kind, detail })?;

        let defaults = self.store.defaults(kind);
        let mut locals = Locals::new();
        for name in names {
            if !name_matches(&name, include, exclude) {
                continue;
            }
            match self.store.single_local(kind, &name) {
                Some(resolved) => {
                    locals.insert(name, resolved);
                }
                // Discovered but undeclared: the default template applies.
                None => {
                    if let Some(defaults) = defaults {
                        locals.insert(name, defaults.clone());
                    }
                }
            }
        }
        Ok(locals)
    }

    fn partitioned_stacks(
        &self,
        kind: ResourceKind,
        locals: Locals,
    ) -> Result<Vec<StackSpec>, Error> {
        let allowed = match kind.metrics() {
            [] => None,
            metrics => Some(metrics),
        };
        let costs = count_resource_units(&locals, allowed, kind.unit_overhead());
        let groups = partition(costs, self.reserve_one_unit);
        self.assembled(kind, groups)
    }

    fn assembled(
        &self,
        kind: ResourceKind,
        groups: Vec<Locals>,
    ) -> Result<Vec<StackSpec>, Error> {
        let mut out = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            if group.is_empty() {
                continue;
            }
            let name = format!("{}-{}-alarms-{}", self.prefix, kind.slug(), index + 1);
            out.push(assemble_stack(kind, &name, group, self.store.topics())?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DeployedGroup;
    use futures::executor::block_on;
    use futures::future::{BoxFuture, FutureExt};

    struct Fixture {
        names: Vec<&'static str>,
        deployed: Vec<DeployedGroup>,
    }

    impl Inventory for Fixture {
        fn list_names<'a>(
            &'a self,
            _kind: ResourceKind,
        ) -> BoxFuture<'a, anyhow::Result<Vec<String>>> {
            let names = self.names.iter().map(|n| n.to_string()).collect();
            async move { Ok(names) }.boxed()
        }
    }

    impl DeployedGroups for Fixture {
        fn deployed_groups<'a>(
            &'a self,
            _prefix: &'a str,
        ) -> BoxFuture<'a, anyhow::Result<Vec<DeployedGroup>>> {
            let deployed = self.deployed.clone();
            async move { Ok(deployed) }.boxed()
        }
    }

    fn store() -> Store {
        Store::from_yaml(
            r#"
lambdas:
  lambda-1:
    Errors:
      enabled: true
  lambda-2: {}
sqsQueues:
  work-queue:
    ApproximateAgeOfOldestMessage:
      enabled: true
      alarm:
        critical:
          threshold: 600
          evaluationPeriods: 1
custom:
  default:
    lambda:
      Errors:
        enabled: false
        alarm:
          critical:
            threshold: 10
            evaluationPeriods: 1
  snsTopics:
    critical:
      id: critical-topic
      name: Critical alerts
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_declared_stacks() {
        let store = store();
        let builder = StackBuilder::new(&store, "monitoring");

        let stacks = builder.declared_stacks(ResourceKind::SqsQueue).unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].name, "monitoring-sqs-alarms-1");
        assert_eq!(
            stacks[0].alarms[0].alarm_name,
            "work-queue-ApproximateAgeOfOldestMessage-critical"
        );
        assert_eq!(stacks[0].alarms[0].dimensions["QueueName"], "work-queue");
    }

    #[test]
    fn test_discovered_stacks_apply_defaults_and_filters() {
        let store = store();
        let builder = StackBuilder::new(&store, "monitoring");
        let fixture = Fixture {
            // lambda-3 exists but is undeclared; lambda-9 is filtered out.
            names: vec!["lambda-1", "lambda-2", "lambda-3", "lambda-9"],
            deployed: Vec::new(),
        };

        let stacks = block_on(builder.discovered_stacks(
            &fixture,
            ResourceKind::Lambda,
            &[],
            &["lambda-9".to_string()],
        ))
        .unwrap();

        // lambda-1 re-enables Errors; lambda-2 and lambda-3 inherit the
        // disabled default and build nothing.
        assert_eq!(stacks.len(), 1);
        let names: Vec<_> = stacks[0].alarms.iter().map(|a| a.alarm_name.as_str()).collect();
        assert_eq!(names, vec!["lambda-1-Errors-critical"]);
    }

    #[test]
    fn test_lambda_stacks_honor_deployed_groups() {
        let store = Store::from_yaml(
            r#"
lambdas:
  lambda-1:
    Errors: {enabled: true}
  lambda-2:
    Errors: {enabled: true}
  lambda-3:
    Errors: {enabled: true}
custom:
  default:
    lambda:
      Errors:
        alarm:
          critical:
            threshold: 10
            evaluationPeriods: 1
  snsTopics:
    critical:
      id: critical-topic
      name: Critical alerts
"#,
        )
        .unwrap();
        let builder = StackBuilder::new(&store, "monitoring");
        let fixture = Fixture {
            names: vec!["lambda-1", "lambda-2", "lambda-3"],
            deployed: vec![DeployedGroup {
                index: 1,
                members: vec!["lambda-2".to_string()],
            }],
        };

        let stacks =
            block_on(builder.lambda_stacks(&fixture, &fixture, &[], &[])).unwrap();

        // lambda-2 stays in the second stack; the first fills with the rest.
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[0].name, "monitoring-lambda-alarms-1");
        let first: Vec<_> = stacks[0].alarms.iter().map(|a| a.alarm_name.as_str()).collect();
        assert_eq!(
            first,
            vec!["lambda-1-Errors-critical", "lambda-3-Errors-critical"]
        );
        assert_eq!(stacks[1].name, "monitoring-lambda-alarms-2");
        assert_eq!(stacks[1].alarms[0].alarm_name, "lambda-2-Errors-critical");
    }

    #[test]
    fn test_account_stack() {
        let store = Store::from_yaml(
            r#"
custom:
  default:
    account:
      UserErrors:
        enabled: true
        alarm:
          critical:
            threshold: 5
            evaluationPeriods: 1
  snsTopics:
    critical:
      id: critical-topic
      name: Critical alerts
"#,
        )
        .unwrap();
        let builder = StackBuilder::new(&store, "monitoring");
        let stack = builder.account_stack().unwrap().unwrap();
        assert_eq!(stack.name, "monitoring-account-alarms");
        assert_eq!(stack.alarms[0].alarm_name, "account-UserErrors-critical");

        // Nothing enabled, nothing built.
        let empty = Store::from_yaml("custom: {default: {account: {UserErrors: {enabled: false}}}}")
            .unwrap();
        let builder = StackBuilder::new(&empty, "monitoring");
        assert!(builder.account_stack().unwrap().is_none());
    }

    #[test]
    fn test_log_group_stacks_carry_filter_overhead() {
        let store = Store::from_yaml(
            r#"
logGroups:
  app-logs:
    ErrorLogged:
      enabled: true
      filter:
        pattern: '"ERROR"'
      alarm:
        critical:
          threshold: 1
          evaluationPeriods: 1
custom:
  snsTopics:
    critical:
      id: critical-topic
      name: Critical alerts
"#,
        )
        .unwrap();
        let builder = StackBuilder::new(&store, "monitoring");

        let stacks = builder.declared_stacks(ResourceKind::LogGroup).unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].name, "monitoring-log-group-alarms-1");
        assert_eq!(stacks[0].metric_filters.len(), 1);
        assert_eq!(stacks[0].alarms.len(), 1);
        assert_eq!(stacks[0].resource_count(), 2);
    }

    #[test]
    fn test_empty_enabled_set_builds_no_stacks() {
        let store = store();
        let builder = StackBuilder::new(&store, "monitoring");
        assert!(builder.declared_stacks(ResourceKind::Table).unwrap().is_empty());
    }
}
