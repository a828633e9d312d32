use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on the comparison list; configuration may only lower it.
pub const MAX_COMPARE_CAPACITY: usize = 3;

/// Configuration for the car_market module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarMarketConfig {
    /// How many cars the comparison list holds, `1..=MAX_COMPARE_CAPACITY`.
    #[serde(
        default = "default_compare_capacity",
        deserialize_with = "compare_capacity_in_range"
    )]
    pub compare_capacity: usize,
    /// How many recent search queries are remembered.
    #[serde(default = "default_recent_searches_limit")]
    pub recent_searches_limit: usize,
    /// Write demo cars and accounts into an empty store on initialize.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

impl Default for CarMarketConfig {
    fn default() -> Self {
        Self {
            compare_capacity: default_compare_capacity(),
            recent_searches_limit: default_recent_searches_limit(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

fn default_compare_capacity() -> usize {
    MAX_COMPARE_CAPACITY
}

fn compare_capacity_in_range<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let capacity = usize::deserialize(deserializer)?;
    if !(1..=MAX_COMPARE_CAPACITY).contains(&capacity) {
        return Err(serde::de::Error::custom(format!(
            "compare_capacity must be between 1 and {}, got {}",
            MAX_COMPARE_CAPACITY, capacity
        )));
    }
    Ok(capacity)
}

fn default_recent_searches_limit() -> usize {
    5
}

fn default_seed_demo_data() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CarMarketConfig::default();
        assert_eq!(config.compare_capacity, 3);
        assert_eq!(config.recent_searches_limit, 5);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: CarMarketConfig =
            serde_json::from_str(r#"{"compare_capacity": 2}"#).expect("Should deserialize");
        assert_eq!(config.compare_capacity, 2);
        assert_eq!(config.recent_searches_limit, 5);
    }

    #[test]
    fn compare_capacity_outside_range_rejected() {
        for raw in [r#"{"compare_capacity": 0}"#, r#"{"compare_capacity": 4}"#] {
            let err = serde_json::from_str::<CarMarketConfig>(raw).unwrap_err();
            assert!(err.to_string().contains("between 1 and 3"), "{}", err);
        }
        let max: CarMarketConfig = serde_json::from_str(r#"{"compare_capacity": 3}"#).unwrap();
        assert_eq!(max.compare_capacity, MAX_COMPARE_CAPACITY);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(serde_json::from_str::<CarMarketConfig>(r#"{"capacity": 4}"#).is_err());
    }
}
