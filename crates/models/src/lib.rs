/// Error returned when a configuration string doesn't belong to a closed
/// vocabulary, such as a comparison operator or a metric unit.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{value:?} is not a valid {vocabulary}")]
pub struct ParseError {
    pub vocabulary: &'static str,
    pub value: String,
}

// Vocabularies are closed string enumerations of the monitoring platform.
// Parsing is fallible and case-insensitive over a set of accepted spellings,
// while serialization always emits the platform's canonical spelling.
macro_rules! string_vocabulary {
    (
        $(#[$outer:meta])*
        $name:ident, $vocabulary:literal, {
            $($variant:ident => $canonical:literal, [$($accepted:literal),*]),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($($accepted => Ok(Self::$variant),)*)+
                    _ => Err(crate::ParseError {
                        vocabulary: $vocabulary,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl schemars::JsonSchema for $name {
            fn schema_name() -> String {
                $vocabulary.split_whitespace().collect()
            }
            fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
                String::json_schema(gen)
            }
        }
    };
}

mod alarms;
mod document;
mod durations;
mod kinds;
mod metrics;

pub use alarms::{
    AlarmOptions, ComparisonOperator, FilterOptions, MetricAlarm, MetricMap, TreatMissingData,
};
pub use document::{CliOptions, Custom, Document, Locals, TopicConfig};
pub use durations::MetricDuration;
pub use kinds::ResourceKind;
pub use metrics::{MetricOptions, MetricUnit, Statistic};
