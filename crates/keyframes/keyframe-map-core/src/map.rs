//! Sparse keyframe map with hold-last-value lookup.
//!
//! Model:
//! - Keyframes are stored sparsely, ordered by integer frame position.
//! - The map advertises an inclusive `[start, end]` coverage range; inserting
//!   outside it widens the range, nothing ever shrinks it.
//! - Reading an unstored frame returns the nearest earlier keyframe (step
//!   semantics). Only those fallback reads are checked against the declared
//!   value kind and passed through the access hook.
//! - Traversal is dense: every frame in the range, stored or not.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::Excluded;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::MapConfig;
use crate::error::KeyframeError;
use crate::iter::{Items, OrderedPositions, Values};
use crate::position::FramePosition;
use crate::value::{Keyed, Value};

/// Adapts a fallback-resolved value before it is returned.
///
/// Called as `hook(map, actual_key, requested_key, value)`, where `actual_key`
/// is the keyframe that supplied `value` and `requested_key` the frame asked
/// for. The return value replaces the result.
pub type AccessHook<V> = Arc<dyn Fn(&KeyframeMap<V>, i64, i64, V) -> V + Send + Sync>;

pub struct KeyframeMap<V: Keyed = Value> {
    value_kind: V::Kind,
    start: i64,
    end: i64,
    entries: BTreeMap<i64, V>,
    on_access: Option<AccessHook<V>>,
}

impl<V: Keyed> KeyframeMap<V> {
    /// Empty map covering only frame 0.
    pub fn new(value_kind: V::Kind) -> Self {
        Self::with_bounds(value_kind, 0, 0)
    }

    /// Empty map covering `[start, end]`. The bounds are taken as given.
    pub fn with_bounds(value_kind: V::Kind, start: i64, end: i64) -> Self {
        Self {
            value_kind,
            start,
            end,
            entries: BTreeMap::new(),
            on_access: None,
        }
    }

    pub fn with_on_access<F>(mut self, hook: F) -> Self
    where
        F: Fn(&KeyframeMap<V>, i64, i64, V) -> V + Send + Sync + 'static,
    {
        self.on_access = Some(Arc::new(hook));
        self
    }

    #[inline]
    pub fn value_kind(&self) -> V::Kind {
        self.value_kind
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    #[inline]
    pub fn bounds(&self) -> (i64, i64) {
        (self.start, self.end)
    }

    #[inline]
    pub fn has_on_access(&self) -> bool {
        self.on_access.is_some()
    }

    /// Store `value` at `position`, widening the range to include it.
    ///
    /// Returns the value previously stored there. The value's kind is not
    /// checked here.
    pub fn insert<P: FramePosition>(
        &mut self,
        position: P,
        value: V,
    ) -> Result<Option<V>, KeyframeError> {
        let position = position.to_frame()?;
        if position > self.end {
            debug!("keyframe at {position} widens end {} -> {position}", self.end);
            self.end = position;
        }
        if position < self.start {
            debug!(
                "keyframe at {position} widens start {} -> {position}",
                self.start
            );
            self.start = position;
        }
        Ok(self.entries.insert(position, value))
    }

    /// Value at `position`, falling back to the nearest earlier keyframe.
    ///
    /// Fails with `NotFound` when no keyframe strictly between `start` and
    /// `position` exists. A keyframe stored exactly at `start` only answers
    /// reads of `start` itself.
    pub fn get<P: FramePosition>(&self, position: P) -> Result<V, KeyframeError> {
        let position = position.to_frame()?;
        self.resolve_frame(position)?
            .ok_or(KeyframeError::NotFound {
                position,
                start: self.start,
            })
    }

    /// Like [`get`](Self::get), but an exhausted fallback scan yields
    /// `Ok(None)` instead of an error.
    pub fn resolve<P: FramePosition>(&self, position: P) -> Result<Option<V>, KeyframeError> {
        self.resolve_frame(position.to_frame()?)
    }

    fn resolve_frame(&self, position: i64) -> Result<Option<V>, KeyframeError> {
        if position < self.start || position > self.end {
            return Err(KeyframeError::OutOfRange {
                position,
                start: self.start,
                end: self.end,
            });
        }
        if let Some(value) = self.entries.get(&position) {
            return Ok(Some(value.clone()));
        }

        // The scan never reaches `start` itself.
        let predecessor = if position > self.start {
            self.entries
                .range((Excluded(self.start), Excluded(position)))
                .next_back()
        } else {
            None
        };
        let Some((&actual, value)) = predecessor else {
            trace!("no keyframe before {position} (start {})", self.start);
            return Ok(None);
        };

        let kind = value.kind();
        if kind != self.value_kind {
            return Err(KeyframeError::TypeMismatch {
                position: actual,
                expected: format!("{:?}", self.value_kind),
                actual: format!("{kind:?}"),
            });
        }

        trace!("frame {position} resolved from keyframe {actual}");
        let value = value.clone();
        Ok(Some(match &self.on_access {
            Some(hook) => hook(self, actual, position, value),
            None => value,
        }))
    }

    /// True for every frame of the dense traversal, keyframed or not.
    /// Non-integer positions are never contained.
    pub fn contains<P: FramePosition>(&self, position: P) -> bool {
        match position.to_frame() {
            Ok(position) => self.ordered_positions().any(|p| p == position),
            Err(_) => false,
        }
    }

    /// Number of frames the dense traversal yields.
    pub fn count(&self) -> usize {
        self.ordered_positions().count()
    }

    pub fn ordered_positions(&self) -> OrderedPositions<'_, V> {
        OrderedPositions::new(self.entries.keys(), self.start, self.end)
    }

    pub fn values(&self) -> Values<'_, V> {
        Values::new(self)
    }

    pub fn items(&self) -> Items<'_, V> {
        Items::new(self)
    }

    /// Physically stored keyframes, ascending.
    pub fn keyframes(&self) -> impl DoubleEndedIterator<Item = (i64, &V)> + '_ {
        self.entries.iter().map(|(&k, v)| (k, v))
    }

    #[inline]
    pub fn keyframe_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether `position` holds an explicit keyframe (unlike [`contains`](Self::contains)).
    pub fn is_keyframe<P: FramePosition>(&self, position: P) -> bool {
        position
            .to_frame()
            .map(|p| self.entries.contains_key(&p))
            .unwrap_or(false)
    }

    /// Exact keyframe at `position`, without fallback.
    pub fn get_keyframe<P: FramePosition>(&self, position: P) -> Option<&V> {
        let position = position.to_frame().ok()?;
        self.entries.get(&position)
    }
}

impl KeyframeMap<Value> {
    pub fn from_config(cfg: &MapConfig) -> Self {
        Self::with_bounds(cfg.value_kind, cfg.start, cfg.end)
    }
}

impl<V: Keyed> Clone for KeyframeMap<V> {
    fn clone(&self) -> Self {
        Self {
            value_kind: self.value_kind,
            start: self.start,
            end: self.end,
            entries: self.entries.clone(),
            on_access: self.on_access.clone(),
        }
    }
}

impl<V: Keyed + fmt::Debug> fmt::Debug for KeyframeMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeMap")
            .field("value_kind", &self.value_kind)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("entries", &self.entries)
            .field("on_access", &self.on_access.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn insert_returns_previous() {
        let mut map = KeyframeMap::<Value>::with_bounds(ValueKind::Int, 0, 3);
        assert_eq!(map.insert(1, Value::Int(1)).unwrap(), None);
        assert_eq!(map.insert(1, Value::Int(2)).unwrap(), Some(Value::Int(1)));
        assert_eq!(map.keyframe_count(), 1);
    }

    #[test]
    fn resolve_keeps_legacy_empty_result() {
        let mut map = KeyframeMap::<Value>::with_bounds(ValueKind::Int, 0, 3);
        map.insert(2, Value::Int(5)).unwrap();
        assert_eq!(map.resolve(1).unwrap(), None);
        assert_eq!(map.resolve(3).unwrap(), Some(Value::Int(5)));
        assert!(matches!(
            map.get(1),
            Err(KeyframeError::NotFound {
                position: 1,
                start: 0
            })
        ));
    }

    #[test]
    fn debug_omits_hook_body() {
        let map = KeyframeMap::<Value>::new(ValueKind::Bool).with_on_access(|_, _, _, v| v);
        let printed = format!("{map:?}");
        assert!(printed.contains("on_access: true"));
    }
}
