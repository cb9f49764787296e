use serde::{Deserialize, Serialize};

/// Configuration for the story engine.
/// Every field has a default; a page may override any subset via JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Persistent store keys.
    pub keys: StoreKeys,
    /// Entry-page keyword cloud layout.
    pub layout: LayoutConfig,
    /// Vanish-then-navigate timings.
    pub transition: TransitionConfig,
    /// Puzzle unlock and hint thresholds.
    pub puzzle: PuzzleConfig,
    /// Fragment capture heuristics.
    pub capture: CaptureConfig,
}

impl StoryConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Names of the three persisted entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreKeys {
    pub visited: String,
    pub fragments: String,
    pub attempts: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            visited: "bos_visited_keys_v1".into(),
            fragments: "bos_fragments_v1".into(),
            attempts: "bos_puzzle_attempts_v1".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Container width used when the cloud has not been measured (default: 920).
    pub fallback_width: f64,
    /// Container height used when the cloud has not been measured (default: 520).
    pub fallback_height: f64,
    /// Horizontal space reserved for the element itself (default: 280).
    pub x_margin: f64,
    /// Vertical space reserved for the element itself (default: 60).
    pub y_margin: f64,
    /// Smallest horizontal span positions are drawn from (default: 20).
    pub min_x_span: f64,
    /// Smallest vertical span positions are drawn from (default: 40).
    pub min_y_span: f64,
    /// Upper bound of the float start delay in seconds (default: 1.8).
    pub max_float_delay: f64,
    /// Float amplitude lower bound in pixels (default: 10).
    pub min_float_amp: f64,
    /// Float amplitude range width in pixels (default: 12).
    pub float_amp_range: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fallback_width: 920.0,
            fallback_height: 520.0,
            x_margin: 280.0,
            y_margin: 60.0,
            min_x_span: 20.0,
            min_y_span: 40.0,
            max_float_delay: 1.8,
            min_float_amp: 10.0,
            float_amp_range: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Navigation delay after picking a keyword on the entry page (default: 800ms).
    pub keyword_delay_ms: u32,
    /// Navigation delay after picking a plain choice link (default: 1000ms).
    pub choice_link_delay_ms: u32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            keyword_delay_ms: 800,
            choice_link_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Minimum positional accuracy that unlocks the narrative (default: 0.60).
    pub unlock_threshold: f64,
    /// Failed attempts after which the hint strip is shown (default: 3).
    pub hint_after: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            unlock_threshold: 0.60,
            hint_after: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Text containing any of these is treated as not yet supplied.
    pub placeholder_markers: Vec<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            placeholder_markers: vec!["PASTE HERE".into(), "【PASTE".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = StoryConfig::from_json("{}").unwrap();
        assert_eq!(config, StoryConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "keys": { "visited": "custom_visited" },
            "transition": { "keyword_delay_ms": 1200 }
        }"#;
        let config = StoryConfig::from_json(json).unwrap();
        assert_eq!(config.keys.visited, "custom_visited");
        assert_eq!(config.keys.fragments, "bos_fragments_v1");
        assert_eq!(config.transition.keyword_delay_ms, 1200);
        assert_eq!(config.transition.choice_link_delay_ms, 1000);
        assert_eq!(config.puzzle.hint_after, 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(StoryConfig::from_json("{ keys: ").is_err());
    }
}
