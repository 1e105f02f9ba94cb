use serde::{Deserialize, Serialize};

pub const DEFAULT_PHRASE_BOOST: f64 = 10.0;
// leading characters of each term left untouched by fuzzy expansion
pub const DEFAULT_PREFIX_LENGTH: u32 = 1;
// documents scoring below this are dropped by the engine
pub const DEFAULT_MIN_SCORE: f64 = 0.1;
pub const DEFAULT_FUZZINESS: &str = "AUTO";

/// How the relevance assembler compiles its filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelevanceFilterMode {
    /// Every filter becomes a `term` clause, list values included.
    #[default]
    ExactTerm,
    /// List values become `terms`, as in the other assemblers.
    ListAware,
}

impl std::str::FromStr for RelevanceFilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "term" | "exact-term" => Ok(RelevanceFilterMode::ExactTerm),
            "list-aware" | "terms" => Ok(RelevanceFilterMode::ListAware),
            other => Err(format!("unknown relevance filter mode: {other}")),
        }
    }
}

/// Scoring constants for the relevance assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub phrase_boost: f64,
    pub prefix_length: u32,
    pub min_score: f64,
    pub fuzziness: String,
    pub relevance_filters: RelevanceFilterMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            phrase_boost: DEFAULT_PHRASE_BOOST,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            min_score: DEFAULT_MIN_SCORE,
            fuzziness: DEFAULT_FUZZINESS.to_string(),
            relevance_filters: RelevanceFilterMode::default(),
        }
    }
}

impl Tuning {
    /// Defaults overridden by `ESDSL_*` environment variables; unparsable values are ignored.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            phrase_boost: env_parse("ESDSL_PHRASE_BOOST").unwrap_or(d.phrase_boost),
            prefix_length: env_parse("ESDSL_PREFIX_LENGTH").unwrap_or(d.prefix_length),
            min_score: env_parse("ESDSL_MIN_SCORE").unwrap_or(d.min_score),
            fuzziness: std::env::var("ESDSL_FUZZINESS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(d.fuzziness),
            relevance_filters: env_parse("ESDSL_RELEVANCE_FILTERS")
                .unwrap_or(d.relevance_filters),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let t = Tuning::default();
        assert_eq!(t.phrase_boost, 10.0);
        assert_eq!(t.prefix_length, 1);
        assert_eq!(t.min_score, 0.1);
        assert_eq!(t.fuzziness, "AUTO");
        assert_eq!(t.relevance_filters, RelevanceFilterMode::ExactTerm);
    }

    #[test]
    fn partial_tuning_fills_in_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"min_score": 0.5}"#).unwrap();
        assert_eq!(t.min_score, 0.5);
        assert_eq!(t.phrase_boost, DEFAULT_PHRASE_BOOST);
    }

    #[test]
    fn filter_mode_parses() {
        assert_eq!(
            "list-aware".parse::<RelevanceFilterMode>().unwrap(),
            RelevanceFilterMode::ListAware
        );
        assert!("bogus".parse::<RelevanceFilterMode>().is_err());
    }
}
