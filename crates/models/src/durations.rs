use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ParseError;

/// MetricDuration is a symbolic duration of the configuration document.
/// Exactly one field is expected; when several are set, the first of
/// milliseconds, seconds, minutes, hours, days, and iso wins.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricDuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u64>,
    /// # ISO-8601 duration, such as "PT5M".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
}

impl MetricDuration {
    /// Default period of a metric statistic, when no period is configured.
    pub fn default_period() -> Duration {
        Duration::from_secs(300)
    }

    /// Resolve into a concrete Duration.
    /// An empty MetricDuration resolves to the default period.
    pub fn resolve(&self) -> Result<Duration, ParseError> {
        if let Some(ms) = self.milliseconds {
            return Ok(Duration::from_millis(ms));
        }
        if let Some(s) = self.seconds {
            return Ok(Duration::from_secs(s));
        }
        if let Some(m) = self.minutes {
            return Ok(Duration::from_secs(m * 60));
        }
        if let Some(h) = self.hours {
            return Ok(Duration::from_secs(h * 3600));
        }
        if let Some(d) = self.days {
            return Ok(Duration::from_secs(d * 86400));
        }
        if let Some(iso) = &self.iso {
            return parse_iso_8601(iso);
        }
        Ok(Self::default_period())
    }
}

// Parse an ISO-8601 duration of the form P[nD][T[nH][nM][nS]].
// Year, month, and week designators are not supported: they have no fixed
// length in seconds.
fn parse_iso_8601(input: &str) -> Result<Duration, ParseError> {
    let err = || ParseError {
        vocabulary: "ISO-8601 duration",
        value: input.to_string(),
    };

    let rest = input.strip_prefix('P').ok_or_else(err)?;
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) if !time.is_empty() => (date, time),
        Some(_) => return Err(err()),
        None => (rest, ""),
    };
    if date.is_empty() && time.is_empty() {
        return Err(err());
    }

    let mut seconds = 0u64;
    for (part, designators) in [(date, &[('D', 86400u64)][..]), (time, &[('H', 3600), ('M', 60), ('S', 1)][..])] {
        let mut remainder = part;
        for &(designator, scale) in designators {
            if let Some((digits, rest)) = remainder.split_once(designator) {
                let n: u64 = digits.parse().map_err(|_| err())?;
                seconds += n * scale;
                remainder = rest;
            }
        }
        if !remainder.is_empty() {
            return Err(err());
        }
    }
    Ok(Duration::from_secs(seconds))
}
