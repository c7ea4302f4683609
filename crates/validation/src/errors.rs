#[must_use]
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("alarm channel {channel} of {resource} metric {metric} references no declared notification topic")]
    UnknownChannel {
        resource: String,
        metric: String,
        channel: String,
    },
    #[error("active alarm channel {channel} of {resource} metric {metric} has no threshold")]
    MissingThreshold {
        resource: String,
        metric: String,
        channel: String,
    },
    #[error("active alarm channel {channel} of {resource} metric {metric} has no evaluation periods")]
    MissingEvaluationPeriods {
        resource: String,
        metric: String,
        channel: String,
    },
}
