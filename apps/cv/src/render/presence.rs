//! Field presence gate: decides, field by field, whether a block renders.
//!
//! There is no whole-profile check: each field and each collection is gated
//! on its own, and one absent field never hides another.

use indexmap::IndexMap;

pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

/// Numbers render unless NaN.
impl Presence for f64 {
    fn is_present(&self) -> bool {
        !self.is_nan()
    }
}

/// Flags render only when true.
impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<T> Presence for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Presence for IndexMap<K, V> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

/// The text, if it passes the gate.
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| s.is_present())
}

/// The amount, if it passes the gate.
pub fn amount(value: Option<f64>) -> Option<f64> {
    value.filter(Presence::is_present)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_gate() {
        assert_eq!(text(&Some("Medellín".to_string())), Some("Medellín"));
        assert_eq!(text(&Some(String::new())), None);
        assert_eq!(text(&None), None);
    }

    #[test]
    fn test_amount_gate_rejects_nan() {
        assert_eq!(amount(Some(1.0)), Some(1.0));
        assert_eq!(amount(Some(0.0)), Some(0.0));
        assert_eq!(amount(Some(f64::NAN)), None);
        assert_eq!(amount(None), None);
    }

    #[test]
    fn test_flag_gate() {
        assert!(true.is_present());
        assert!(!false.is_present());
        assert!(!None::<bool>.is_present());
    }

    #[test]
    fn test_collection_gate() {
        assert!(!Vec::<String>::new().is_present());
        assert!(vec!["Rust".to_string()].is_present());
        assert!(!None::<Vec<String>>.is_present());
        let mut links = IndexMap::new();
        assert!(!links.is_present());
        links.insert("Blog", "https://ana.dev");
        assert!(links.is_present());
    }
}
