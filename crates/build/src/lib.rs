mod cost;
mod inventory;
mod partition;
mod stacks;

pub use cost::count_resource_units;
pub use inventory::{name_matches, DeployedGroup, DeployedGroups, Inventory};
pub use partition::{partition, partition_kind, partition_pinned, STACK_RESOURCE_LIMIT};
pub use stacks::StackBuilder;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Assemble(#[from] assemble::Error),
    #[error("failed to list {kind} resources")]
    Inventory {
        kind: models::ResourceKind,
        #[source]
        detail: anyhow::Error,
    },
    #[error("failed to look up deployed groups of {prefix}")]
    DeployedGroups {
        prefix: String,
        #[source]
        detail: anyhow::Error,
    },
}
