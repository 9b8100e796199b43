// api/error.rs
//
// Errors surfaced when a tween is created or its spec is parsed.
// Running tweens never fail: degenerate durations and repeated stops are defined behavior.

use thiserror::Error;

/// Configuration errors reported by `TweenEngine::start_tween` and spec parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// The target has no property with this name.
    #[error("target has no property '{property}'")]
    InvalidTarget { property: String },

    /// Loop policy name or code is not one of once/forever/hold/pingpong.
    #[error("unknown loop policy '{value}'")]
    InvalidPolicy { value: String },

    /// A JSON tween spec could not be parsed.
    #[error("invalid tween spec: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        TweenError::Config(err.to_string())
    }
}

pub type TweenResult<T> = Result<T, TweenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = TweenError::InvalidTarget { property: "opacty".into() };
        assert_eq!(err.to_string(), "target has no property 'opacty'");

        let err = TweenError::InvalidPolicy { value: "3".into() };
        assert_eq!(err.to_string(), "unknown loop policy '3'");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: TweenError = serde_json::from_str::<f64>("nope").unwrap_err().into();
        assert!(matches!(err, TweenError::Config(_)));
    }
}
