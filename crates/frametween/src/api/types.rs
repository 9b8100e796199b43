use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::config::ValueFormat;
use super::error::{TweenError, TweenResult};

/// What happens when a tween's progress reaches 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopPolicy {
    /// Snap to `to` and stop.
    #[default]
    Once,
    /// Restart from `from` with the same bounds.
    Forever,
    /// Keep running but stay parked at the end.
    Hold,
    /// Swap `from`/`to` and run back.
    PingPong,
}

impl LoopPolicy {
    pub const ALL: [LoopPolicy; 4] = [
        LoopPolicy::Once,
        LoopPolicy::Forever,
        LoopPolicy::Hold,
        LoopPolicy::PingPong,
    ];

    /// Decode the legacy numeric policy codes (0, 2, 4, 8).
    pub fn from_code(code: i64) -> TweenResult<Self> {
        match code {
            0 => Ok(LoopPolicy::Once),
            2 => Ok(LoopPolicy::Forever),
            4 => Ok(LoopPolicy::Hold),
            8 => Ok(LoopPolicy::PingPong),
            other => Err(TweenError::InvalidPolicy { value: other.to_string() }),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            LoopPolicy::Once => 0,
            LoopPolicy::Forever => 2,
            LoopPolicy::Hold => 4,
            LoopPolicy::PingPong => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LoopPolicy::Once => "once",
            LoopPolicy::Forever => "forever",
            LoopPolicy::Hold => "hold",
            LoopPolicy::PingPong => "pingpong",
        }
    }
}

impl fmt::Display for LoopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LoopPolicy {
    type Err = TweenError;

    /// Accepts names case-insensitively, ignoring `-` and `_`.
    /// `normal` and `continue` are accepted as older names for once and hold.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "once" | "normal" => Ok(LoopPolicy::Once),
            "forever" => Ok(LoopPolicy::Forever),
            "hold" | "continue" => Ok(LoopPolicy::Hold),
            "pingpong" => Ok(LoopPolicy::PingPong),
            _ => Err(TweenError::InvalidPolicy { value: s.to_string() }),
        }
    }
}

impl Serialize for LoopPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Bounds, duration and loop policy of a tween.
///
/// The engine works on its own copy: ping-pong swaps `from`/`to` in that copy
/// and a manual stop forces `policy` to `Once`. Callbacks receive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpec")]
pub struct TweenSpec {
    pub from: f64,
    pub to: f64,
    /// Seconds. Zero or negative completes on the first step.
    pub duration: f64,
    pub policy: LoopPolicy,
}

impl TweenSpec {
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            policy: LoopPolicy::Once,
        }
    }

    pub fn with_policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse a spec such as `{"from": 0, "to": 1, "duration": 0.5, "policy": "pingpong"}`.
    ///
    /// `time` is accepted for `duration` and `type` for `policy`; the policy may
    /// be a name or a numeric code.
    pub fn from_json(json: &str) -> TweenResult<Self> {
        let raw: RawSpec = serde_json::from_str(json)?;
        TweenSpec::try_from(raw)
    }

    pub fn to_json(&self) -> TweenResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyRepr {
    Code(i64),
    Name(String),
}

#[derive(Deserialize)]
struct RawSpec {
    from: f64,
    to: f64,
    #[serde(alias = "time")]
    duration: f64,
    #[serde(default, alias = "type")]
    policy: Option<PolicyRepr>,
}

impl TryFrom<RawSpec> for TweenSpec {
    type Error = TweenError;

    fn try_from(raw: RawSpec) -> Result<Self, Self::Error> {
        let policy = match raw.policy {
            None => LoopPolicy::Once,
            Some(PolicyRepr::Code(code)) => LoopPolicy::from_code(code)?,
            Some(PolicyRepr::Name(name)) => name.parse()?,
        };
        Ok(TweenSpec::new(raw.from, raw.to, raw.duration).with_policy(policy))
    }
}

/// Per-frame report passed to `on_update`.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenUpdate {
    /// Frames stepped before this one.
    pub frame: u64,
    /// Seconds since the current cycle started.
    pub elapsed: f64,
    /// Raw progress; exceeds 1 on a completing frame.
    pub progress: f64,
    pub eased: f64,
    /// Value held by every property after this frame.
    pub value: f64,
    /// Decorated form of `value` when a format is configured.
    pub display: Option<String>,
}

/// Snapshot passed to `on_finish` after each completion.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenFinish {
    /// Spec after the policy was applied (swapped bounds for ping-pong).
    pub spec: TweenSpec,
    pub format: Option<ValueFormat>,
    /// Completions so far, including this one.
    pub loops: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_and_aliases() {
        assert_eq!("once".parse::<LoopPolicy>(), Ok(LoopPolicy::Once));
        assert_eq!("Ping-Pong".parse::<LoopPolicy>(), Ok(LoopPolicy::PingPong));
        assert_eq!("ping_pong".parse::<LoopPolicy>(), Ok(LoopPolicy::PingPong));
        assert_eq!("FOREVER".parse::<LoopPolicy>(), Ok(LoopPolicy::Forever));
        assert_eq!("continue".parse::<LoopPolicy>(), Ok(LoopPolicy::Hold));
        assert_eq!("normal".parse::<LoopPolicy>(), Ok(LoopPolicy::Once));
    }

    #[test]
    fn unknown_policy_fails_fast() {
        assert_eq!(
            "bounce".parse::<LoopPolicy>(),
            Err(TweenError::InvalidPolicy { value: "bounce".into() })
        );
        assert!(matches!(
            LoopPolicy::from_code(3),
            Err(TweenError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn codes_match_names() {
        for policy in LoopPolicy::ALL {
            assert_eq!(LoopPolicy::from_code(policy.code()), Ok(policy));
            assert_eq!(policy.name().parse::<LoopPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn spec_from_json() {
        let spec = TweenSpec::from_json(r#"{"from": 0, "to": 100, "duration": 1.5, "policy": "hold"}"#)
            .unwrap();
        assert_eq!(spec, TweenSpec::new(0.0, 100.0, 1.5).with_policy(LoopPolicy::Hold));
    }

    #[test]
    fn spec_from_json_legacy_fields() {
        let spec = TweenSpec::from_json(r#"{"from": 1, "to": 2, "time": 3, "type": 8}"#).unwrap();
        assert_eq!(spec.duration, 3.0);
        assert_eq!(spec.policy, LoopPolicy::PingPong);
    }

    #[test]
    fn spec_from_json_defaults_to_once() {
        let spec = TweenSpec::from_json(r#"{"from": 1, "to": 2, "duration": 3}"#).unwrap();
        assert_eq!(spec.policy, LoopPolicy::Once);
    }

    #[test]
    fn spec_from_json_rejects_unknown_policy() {
        let err = TweenSpec::from_json(r#"{"from": 1, "to": 2, "duration": 3, "policy": 5}"#);
        assert_eq!(err, Err(TweenError::InvalidPolicy { value: "5".into() }));
    }

    #[test]
    fn spec_from_json_rejects_missing_fields() {
        let err = TweenSpec::from_json(r#"{"from": 1}"#);
        assert!(matches!(err, Err(TweenError::Config(_))));
    }

    #[test]
    fn spec_json_uses_policy_name() {
        let spec = TweenSpec::new(0.0, 1.0, 2.0).with_policy(LoopPolicy::Forever);
        let json = spec.to_json().unwrap();
        assert!(json.contains(r#""policy":"forever""#), "got {}", json);
        assert_eq!(TweenSpec::from_json(&json), Ok(spec));
    }
}
