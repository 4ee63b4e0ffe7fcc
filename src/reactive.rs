//! Generation tracking for control values and memoised derivations.
//!
//! egui redraws every frame, so "did this control change?" is answered by
//! comparing generation counters. Each [`Derived`] is keyed on the
//! generations of exactly the inputs it reads.

use std::fmt;

/// An input value plus a counter bumped on every effective change.
pub struct Tracked<T> {
    value: T,
    generation: u64,
}

impl<T: PartialEq> Tracked<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            generation: 0,
        }
    }

    /// Replace the value. Setting an equal value is not a change.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.generation += 1;
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T: PartialEq + Default> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A cached output and the dependency key it was computed from.
pub struct Derived<K, T> {
    name: &'static str,
    cached: Option<(K, T)>,
    recomputations: u64,
}

impl<K: PartialEq + fmt::Debug, T> Derived<K, T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cached: None,
            recomputations: 0,
        }
    }

    /// Return the cached value, running `compute` first if `key` moved on.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> T) -> &T {
        let fresh = matches!(&self.cached, Some((cached_key, _)) if *cached_key == key);
        if !fresh {
            log::debug!("recomputing {} for {:?}", self.name, key);
            self.recomputations += 1;
            self.cached = None;
        }
        let (_, value) = self.cached.get_or_insert_with(|| (key, compute()));
        value
    }

    /// How many times the value has been (re)computed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_value_keeps_generation() {
        let mut t = Tracked::new(3);
        assert!(!t.set(3));
        assert_eq!(t.generation(), 0);
        assert!(t.set(4));
        assert_eq!((*t.get(), t.generation()), (4, 1));
    }

    #[test]
    fn derived_recomputes_only_on_new_key() {
        let mut d: Derived<(u64, u64), String> = Derived::new("label");
        assert_eq!(d.get_or_compute((0, 0), || "a".into()), "a");
        assert_eq!(d.get_or_compute((0, 0), || "b".into()), "a");
        assert_eq!(d.recomputations(), 1);
        assert_eq!(d.get_or_compute((0, 1), || "c".into()), "c");
        assert_eq!(d.recomputations(), 2);
    }
}
