// extensions/easing.rs
//
// Interpolation primitive and a handful of stock easing curves.
// Tweens accept any `Fn(f64) -> f64`; these presets are a convenience.

use std::f64::consts::PI;

/// Linear interpolation. `t` is not clamped: values outside [0, 1] extrapolate.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Identity ease, the default for every tween.
#[inline]
pub fn identity(t: f64) -> f64 {
    t
}

/// Stock easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Overshoots past 1 before settling.
    BackOut,
    BounceOut,
    ElasticOut,
}

/// Shape of a curve, written in its ease-in form.
#[derive(Debug, Clone, Copy)]
enum Curve {
    Power(i32),
    Sine,
    Back,
    Bounce,
    Elastic,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    In,
    Out,
    InOut,
}

impl Curve {
    fn ease_in(self, t: f64) -> f64 {
        const C1: f64 = 1.70158;
        const C3: f64 = C1 + 1.0;
        const C4: f64 = (2.0 * PI) / 3.0;
        match self {
            Curve::Power(n) => t.powi(n),
            Curve::Sine => 1.0 - (t * PI / 2.0).cos(),
            Curve::Back => C3 * t * t * t - C1 * t * t,
            Curve::Bounce => 1.0 - bounce_out(1.0 - t),
            Curve::Elastic => -(10.0 * t - 10.0).exp2() * ((10.0 * t - 10.75) * C4).sin(),
        }
    }
}

impl Mode {
    /// Out mirrors the in-curve; InOut runs it forward then mirrored, half speed.
    fn apply(self, curve: Curve, t: f64) -> f64 {
        match self {
            Mode::In => curve.ease_in(t),
            Mode::Out => 1.0 - curve.ease_in(1.0 - t),
            Mode::InOut if t < 0.5 => curve.ease_in(2.0 * t) / 2.0,
            Mode::InOut => 1.0 - curve.ease_in(2.0 - 2.0 * t) / 2.0,
        }
    }
}

impl Easing {
    pub const ALL: [Easing; 13] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::BackOut,
        Easing::BounceOut,
        Easing::ElasticOut,
    ];

    /// `None` for the identity curve.
    fn shape(self) -> Option<(Curve, Mode)> {
        let shape = match self {
            Easing::Linear => return None,
            Easing::QuadIn => (Curve::Power(2), Mode::In),
            Easing::QuadOut => (Curve::Power(2), Mode::Out),
            Easing::QuadInOut => (Curve::Power(2), Mode::InOut),
            Easing::CubicIn => (Curve::Power(3), Mode::In),
            Easing::CubicOut => (Curve::Power(3), Mode::Out),
            Easing::CubicInOut => (Curve::Power(3), Mode::InOut),
            Easing::SineIn => (Curve::Sine, Mode::In),
            Easing::SineOut => (Curve::Sine, Mode::Out),
            Easing::SineInOut => (Curve::Sine, Mode::InOut),
            Easing::BackOut => (Curve::Back, Mode::Out),
            Easing::BounceOut => (Curve::Bounce, Mode::Out),
            Easing::ElasticOut => (Curve::Elastic, Mode::Out),
        };
        Some(shape)
    }

    /// Evaluate the curve against raw tween progress.
    ///
    /// NaN counts as complete. Progress at or past either end returns exactly
    /// 0 or 1, so a preset settles on `to` once the completing frame overshoots.
    /// Back and Elastic still overshoot strictly inside the range.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t >= 1.0 {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }
        match self.shape() {
            None => t,
            Some((curve, mode)) => mode.apply(curve, t),
        }
    }
}

/// Segments of the bounce: `(upper bound, centre, floor)`.
const BOUNCES: [(f64, f64, f64); 4] = [
    (1.0 / 2.75, 0.0, 0.0),
    (2.0 / 2.75, 1.5 / 2.75, 0.75),
    (2.5 / 2.75, 2.25 / 2.75, 0.9375),
    (f64::INFINITY, 2.625 / 2.75, 0.984375),
];

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    let (_, centre, floor) = BOUNCES
        .iter()
        .copied()
        .find(|(limit, _, _)| t < *limit)
        .unwrap_or(BOUNCES[BOUNCES.len() - 1]);
    let d = t - centre;
    N1 * d * d + floor
}
