//! Configuration types deserialized from `archsb.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// The complete configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ArchsbConfig {
    /// Which architecture file to read.
    #[serde(default)]
    pub architecture: ArchitectureConfig,
    /// What `check` verifies beyond structural validation.
    #[serde(default)]
    pub check: CheckConfig,
    /// Report formatting.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[architecture]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ArchitectureConfig {
    /// Architecture file used when none is given on the command line,
    /// relative to the configuration file.
    pub file: Option<String>,
}

/// `[check]` section.
#[derive(Debug, Deserialize)]
pub struct CheckConfig {
    /// Channel widths `W` at which every permutation function is evaluated.
    ///
    /// Accepts a single integer or a list.
    #[serde(default, deserialize_with = "deserialize_int_or_vec")]
    pub channel_widths: Vec<i64>,
    /// Whether to evaluate permutation functions at all.
    #[serde(default = "default_true")]
    pub probe_formulas: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            channel_widths: Vec::new(),
            probe_formulas: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Accepts `channel_widths = 20` as well as `channel_widths = [20, 100]`.
fn deserialize_int_or_vec<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntOrVec;

    impl<'de> Visitor<'de> for IntOrVec {
        type Value = Vec<i64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("an integer or a list of integers")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(vec![v])
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(|v| vec![v])
                .map_err(|_| E::custom(format!("channel width {v} is too large")))
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<i64>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(IntOrVec)
}

/// `[output]` section.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    pub format: ReportFormat,
    /// Whether to use ANSI colors.
    #[serde(default)]
    pub color: ColorMode,
}

/// How diagnostics and results are printed.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

/// ANSI color policy.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stderr is a terminal (default).
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}
