// extensions/policy.rs
//
// Loop-policy resolution: what a tween does when its progress reaches 1.
// Pure: takes the spec, returns the next spec plus instructions for the driver.

use crate::api::types::{LoopPolicy, TweenSpec};

/// Outcome of one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Spec to keep running with (bounds swapped for ping-pong).
    pub spec: TweenSpec,
    /// Write `to` exactly to every property.
    pub snap: bool,
    /// Restart the cycle clock at the current time.
    pub restart: bool,
    /// Park: stay registered and keep reporting, but stop writing.
    pub hold: bool,
    /// Keep the frame callback registered.
    pub keep_registered: bool,
}

/// Resolve a completion for `spec`.
pub fn resolve(spec: TweenSpec) -> Resolution {
    match spec.policy {
        LoopPolicy::Once => Resolution {
            spec,
            snap: true,
            restart: false,
            hold: false,
            keep_registered: false,
        },
        LoopPolicy::Forever => Resolution {
            spec,
            snap: false,
            restart: true,
            hold: false,
            keep_registered: true,
        },
        LoopPolicy::Hold => Resolution {
            spec,
            snap: false,
            restart: false,
            hold: true,
            keep_registered: true,
        },
        LoopPolicy::PingPong => Resolution {
            spec: TweenSpec {
                from: spec.to,
                to: spec.from,
                ..spec
            },
            snap: false,
            restart: true,
            hold: false,
            keep_registered: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(policy: LoopPolicy) -> TweenSpec {
        TweenSpec::new(1.0, 5.0, 2.0).with_policy(policy)
    }

    #[test]
    fn once_snaps_and_deregisters() {
        let r = resolve(spec(LoopPolicy::Once));
        assert!(r.snap);
        assert!(!r.keep_registered);
        assert_eq!(r.spec, spec(LoopPolicy::Once));
    }

    #[test]
    fn forever_restarts_with_same_bounds() {
        let r = resolve(spec(LoopPolicy::Forever));
        assert!(r.restart && r.keep_registered && !r.snap);
        assert_eq!(r.spec, spec(LoopPolicy::Forever));
    }

    #[test]
    fn hold_parks_in_place() {
        let r = resolve(spec(LoopPolicy::Hold));
        assert!(r.hold && r.keep_registered);
        assert!(!r.restart && !r.snap);
    }

    #[test]
    fn ping_pong_swaps_bounds() {
        let r = resolve(spec(LoopPolicy::PingPong));
        assert!(r.restart && r.keep_registered);
        assert_eq!((r.spec.from, r.spec.to), (5.0, 1.0));

        let back = resolve(r.spec);
        assert_eq!(back.spec, spec(LoopPolicy::PingPong));
    }
}
