// extensions/target.rs
//
// Objects a tween can write to, addressed by property name.
// Every named property of a tween receives the same value each frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One frame's write: the interpolated number plus its decorated form, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenValue<'a> {
    pub value: f64,
    pub display: Option<&'a str>,
}

/// Something with named numeric properties.
pub trait TweenTarget {
    /// Checked for every property when a tween starts.
    fn has_property(&self, name: &str) -> bool;

    fn write_property(&mut self, name: &str, value: TweenValue<'_>);
}

/// A stored property value. Formatted tweens store text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Number(f64),
    Text(String),
}

/// Loosely typed property store, for hosts without a struct of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    props: BTreeMap<String, Property>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.props.insert(name.into(), Property::Number(value));
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.props.get(name)
    }

    /// Numeric value of a property, `None` if missing or text.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.props.get(name)? {
            Property::Number(v) => Some(*v),
            Property::Text(_) => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.props.get(name)? {
            Property::Text(s) => Some(s),
            Property::Number(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl TweenTarget for PropertyBag {
    fn has_property(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    fn write_property(&mut self, name: &str, value: TweenValue<'_>) {
        let prop = match value.display {
            Some(text) => Property::Text(text.to_string()),
            None => Property::Number(value.value),
        };
        self.props.insert(name.to_string(), prop);
    }
}

#[cfg(feature = "vectors")]
mod vectors {
    use glam::{DVec2, Vec2, Vec3};

    use super::{TweenTarget, TweenValue};

    impl TweenTarget for Vec2 {
        fn has_property(&self, name: &str) -> bool {
            matches!(name, "x" | "y")
        }

        fn write_property(&mut self, name: &str, value: TweenValue<'_>) {
            match name {
                "x" => self.x = value.value as f32,
                "y" => self.y = value.value as f32,
                _ => {}
            }
        }
    }

    impl TweenTarget for Vec3 {
        fn has_property(&self, name: &str) -> bool {
            matches!(name, "x" | "y" | "z")
        }

        fn write_property(&mut self, name: &str, value: TweenValue<'_>) {
            match name {
                "x" => self.x = value.value as f32,
                "y" => self.y = value.value as f32,
                "z" => self.z = value.value as f32,
                _ => {}
            }
        }
    }

    impl TweenTarget for DVec2 {
        fn has_property(&self, name: &str) -> bool {
            matches!(name, "x" | "y")
        }

        fn write_property(&mut self, name: &str, value: TweenValue<'_>) {
            match name {
                "x" => self.x = value.value,
                "y" => self.y = value.value,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> TweenValue<'static> {
        TweenValue { value, display: None }
    }

    #[test]
    fn bag_writes_numbers() {
        let mut bag = PropertyBag::new().with("x", 0.0);
        assert!(bag.has_property("x"));
        assert!(!bag.has_property("y"));

        bag.write_property("x", number(4.5));
        assert_eq!(bag.number("x"), Some(4.5));
    }

    #[test]
    fn bag_stores_display_text() {
        let mut bag = PropertyBag::new().with("score", 0.0);
        bag.write_property("score", TweenValue { value: 12.0, display: Some("12 pts") });
        assert_eq!(bag.text("score"), Some("12 pts"));
        assert_eq!(bag.number("score"), None);
    }

    #[test]
    fn bag_serializes_flat() {
        let mut bag = PropertyBag::new().with("a", 1.0);
        bag.write_property("b", TweenValue { value: 2.0, display: Some("2%") });
        assert_eq!(bag.to_json().unwrap(), r#"{"a":1.0,"b":"2%"}"#);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn vec2_components() {
        let mut v = glam::Vec2::ZERO;
        assert!(v.has_property("y"));
        assert!(!v.has_property("z"));
        v.write_property("y", number(3.0));
        assert_eq!(v, glam::Vec2::new(0.0, 3.0));
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn vec3_components() {
        let mut v = glam::Vec3::ONE;
        v.write_property("z", number(-2.0));
        assert_eq!(v, glam::Vec3::new(1.0, 1.0, -2.0));
    }
}
