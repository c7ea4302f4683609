mod specs;
mod stacks;

pub use specs::{AlarmSpec, MetricFilterSpec, StackSpec};
pub use stacks::{assemble_account_stack, assemble_stack, metric_alarms, metric_filter};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] validation::Error),
    #[error("period of {resource} metric {metric} is invalid")]
    Period {
        resource: String,
        metric: String,
        #[source]
        detail: models::ParseError,
    },
}
