use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{MetricDuration, ParseError};

/// MetricOptions configures how a metric's datums are aggregated into the
/// statistic an alarm evaluates.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricOptions {
    /// # Period over which the statistic is applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<MetricDuration>,
    /// # Aggregation function of the metric stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<Statistic>,
    /// # Unit which filters the metric stream.
    /// Only datums emitted with this unit are aggregated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<MetricUnit>,
    /// # Additional dimensions of the metric.
    /// The dimension identifying the monitored resource itself is always
    /// attached and cannot be overridden here.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dimensions: IndexMap<String, String>,
    /// # Label of this metric on dashboard graphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// # Color of this metric on dashboard graphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Statistic is the aggregation function applied to metric datums
/// within an evaluation period.
#[derive(Clone, Debug, PartialEq)]
pub enum Statistic {
    Minimum,
    Maximum,
    Average,
    Sum,
    SampleCount,
    /// A percentile statistic such as `p99` or `p99.9`,
    /// holding its exact configured spelling.
    Percentile(String),
}

lazy_static! {
    static ref PERCENTILE_RE: Regex = Regex::new(r"^p\d{1,2}(\.\d+)?$").unwrap();
}

impl Statistic {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
            Self::Average => "Average",
            Self::Sum => "Sum",
            Self::SampleCount => "SampleCount",
            Self::Percentile(p) => p,
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Statistic {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimum" | "min" => return Ok(Self::Minimum),
            "maximum" | "max" => return Ok(Self::Maximum),
            "average" | "avg" => return Ok(Self::Average),
            "sum" => return Ok(Self::Sum),
            "samplecount" | "n" => return Ok(Self::SampleCount),
            _ => {}
        }
        if PERCENTILE_RE.is_match(s) {
            return Ok(Self::Percentile(s.to_string()));
        }
        Err(ParseError {
            vocabulary: "statistic",
            value: s.to_string(),
        })
    }
}

impl Serialize for Statistic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Statistic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for Statistic {
    fn schema_name() -> String {
        "statistic".to_string()
    }
    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

string_vocabulary!(
    /// Unit which filters a metric stream to matching datums.
    MetricUnit,
    "metric unit",
    {
        Seconds => "Seconds", ["seconds"],
        Microseconds => "Microseconds", ["microseconds"],
        Milliseconds => "Milliseconds", ["milliseconds"],
        Bytes => "Bytes", ["bytes"],
        Kilobytes => "Kilobytes", ["kilobytes"],
        Megabytes => "Megabytes", ["megabytes"],
        Gigabytes => "Gigabytes", ["gigabytes"],
        Terabytes => "Terabytes", ["terabytes"],
        Bits => "Bits", ["bits"],
        Kilobits => "Kilobits", ["kilobits"],
        Megabits => "Megabits", ["megabits"],
        Gigabits => "Gigabits", ["gigabits"],
        Terabits => "Terabits", ["terabits"],
        Percent => "Percent", ["percent"],
        Count => "Count", ["count"],
        BytesPerSecond => "Bytes/Second", ["bytes_per_second", "bytes/second"],
        KilobytesPerSecond => "Kilobytes/Second", ["kilobytes_per_second", "kilobytes/second"],
        MegabytesPerSecond => "Megabytes/Second", ["megabytes_per_second", "megabytes/second"],
        GigabytesPerSecond => "Gigabytes/Second", ["gigabytes_per_second", "gigabytes/second"],
        TerabytesPerSecond => "Terabytes/Second", ["terabytes_per_second", "terabytes/second"],
        BitsPerSecond => "Bits/Second", ["bits_per_second", "bits/second"],
        KilobitsPerSecond => "Kilobits/Second", ["kilobits_per_second", "kilobits/second"],
        MegabitsPerSecond => "Megabits/Second", ["megabits_per_second", "megabits/second"],
        GigabitsPerSecond => "Gigabits/Second", ["gigabits_per_second", "gigabits/second"],
        TerabitsPerSecond => "Terabits/Second", ["terabits_per_second", "terabits/second"],
        CountPerSecond => "Count/Second", ["count_per_second", "count/second"],
        None => "None", ["none"],
    }
);
