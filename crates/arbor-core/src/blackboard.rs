use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::BlackboardError;

/// Typed, symbolic blackboard key.
///
/// Two keys with the same name address the same slot; the type parameter only states what the
/// slot is expected to hold.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Key/value store scoped to a single tree instance.
///
/// Reads never fail hard: a missing key is `None`, and so is a value stored under a different
/// type (logged at `warn`). Use [`Blackboard::try_get`] to tell the two apart.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<&'static str, Box<dyn Any + Send>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Key names currently present, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    pub fn set<T: Send + 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.name, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = key.name, "{err}");
                None
            }
        }
    }

    pub fn try_get<T: 'static>(&self, key: BbKey<T>) -> Result<Option<&T>, BlackboardError> {
        let Some(value) = self.values.get(key.name) else {
            return Ok(None);
        };
        value
            .downcast_ref::<T>()
            .map(Some)
            .ok_or(BlackboardError::TypeMismatch { key: key.name })
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(key.name)?;
        let found = value.downcast_mut::<T>();
        if found.is_none() {
            tracing::warn!(
                key = key.name,
                "{}",
                BlackboardError::TypeMismatch { key: key.name }
            );
        }
        found
    }

    /// Removes and returns the value. A value of a different type is left in place.
    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        if !self.values.get(key.name)?.is::<T>() {
            tracing::warn!(
                key = key.name,
                "{}",
                BlackboardError::TypeMismatch { key: key.name }
            );
            return None;
        }
        let value = self.values.remove(key.name)?;
        value.downcast::<T>().ok().map(|b| *b)
    }
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
