use indexmap::IndexMap;
use models::{Locals, MetricMap, ResourceKind};
use sources::Store;

use crate::inventory::DeployedGroup;
use crate::count_resource_units;

/// Hard platform limit on resources per deployable stack.
pub const STACK_RESOURCE_LIMIT: u32 = 500;

fn ceiling(reserve_one_unit: bool) -> u32 {
    // The deployment tool injects one bookkeeping resource per stack when
    // version reporting is on, so one slot is held back for it.
    if reserve_one_unit {
        STACK_RESOURCE_LIMIT - 1
    } else {
        STACK_RESOURCE_LIMIT
    }
}

/// Distribute costed resources over deployable groups, none exceeding the
/// platform ceiling. A single pass in declaration order: the resource that
/// would overflow the current group starts the next one. The walk is pure
/// and deterministic, so identical inputs partition identically.
///
/// A resource whose own cost exceeds the ceiling is never split: it lands
/// alone in an oversized group, and the breach is logged for operators.
pub fn partition(
    costs: IndexMap<String, (u32, MetricMap)>,
    reserve_one_unit: bool,
) -> Vec<Locals> {
    let ceiling = ceiling(reserve_one_unit);
    let mut groups: Vec<Locals> = Vec::new();
    let mut group = Locals::new();
    let mut group_cost = 0u32;

    for (id, (cost, config)) in costs {
        if cost > ceiling {
            tracing::warn!(
                resource = %id,
                cost,
                ceiling,
                "resource exceeds the stack resource limit on its own and gets an oversized stack"
            );
        }
        if !group.is_empty() && group_cost + cost > ceiling {
            tracing::debug!(
                group = groups.len(),
                cost = group_cost,
                next = %id,
                "sealing full stack group"
            );
            groups.push(std::mem::take(&mut group));
            group_cost = 0;
        }
        group.insert(id, config);
        group_cost += cost;
    }
    if !group.is_empty() {
        groups.push(group);
    }
    groups
}

/// Partition the declared resources of one kind: the cost walk over the
/// store's resolved locals, then the greedy group walk.
pub fn partition_kind(
    store: &Store,
    kind: ResourceKind,
    allowed_metrics: Option<&[&str]>,
    extra_per_resource: u32,
    reserve_one_unit: bool,
) -> Vec<Locals> {
    let costs = count_resource_units(&store.all_locals(kind), allowed_metrics, extra_per_resource);
    partition(costs, reserve_one_unit)
}

/// Partition while honoring the group assignments of an already-deployed
/// generation: surviving members keep their prior group, in their prior
/// order, so a redeploy doesn't shuffle resources between stacks. New
/// resources then fill groups first-fit in ascending order, and overflow
/// into fresh groups.
///
/// Groups which lose all members come back empty and must keep their
/// position: dropping them would renumber every later group.
pub fn partition_pinned(
    costs: IndexMap<String, (u32, MetricMap)>,
    deployed: &[DeployedGroup],
    reserve_one_unit: bool,
) -> Vec<Locals> {
    let ceiling = ceiling(reserve_one_unit);
    let group_count = deployed.iter().map(|g| g.index + 1).max().unwrap_or(0);
    let mut groups: Vec<Locals> = vec![Locals::new(); group_count];
    let mut group_costs: Vec<u32> = vec![0; group_count];

    let mut costs = costs;
    for deployed_group in deployed {
        for member in &deployed_group.members {
            let Some((cost, config)) = costs.shift_remove(member) else {
                continue;
            };
            groups[deployed_group.index].insert(member.clone(), config);
            group_costs[deployed_group.index] += cost;
        }
    }

    for (id, (cost, config)) in costs {
        let slot = (0..groups.len())
            .find(|&i| group_costs[i] + cost <= ceiling || groups[i].is_empty());
        match slot {
            Some(i) => {
                groups[i].insert(id, config);
                group_costs[i] += cost;
            }
            None => {
                groups.push(Locals::from_iter([(id, config)]));
                group_costs.push(cost);
            }
        }
    }
    groups
}
