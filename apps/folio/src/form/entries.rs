use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("No entry at position {} (list has {})", .index + 1, .len)]
    IndexOutOfRange { index: usize, len: usize },
}

/// A record that lives in a repeated list and is edited one field at a time.
pub trait Entry: Clone + Default {
    type Field: Copy;

    fn set(&mut self, field: Self::Field, value: String);
}

/// Ordered list of entries that always holds at least one entry.
///
/// Every operation returns a new snapshot; the receiver is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList<T> {
    items: Vec<T>,
}

impl<T: Entry> EntryList<T> {
    /// A list holding a single blank entry.
    pub fn new() -> Self {
        Self {
            items: vec![T::default()],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn append(&self) -> Self {
        let mut items = self.items.clone();
        items.push(T::default());
        Self { items }
    }

    pub fn update(&self, index: usize, field: T::Field, value: impl Into<String>) -> Result<Self, FormError> {
        self.check(index)?;
        let mut items = self.items.clone();
        items[index].set(field, value.into());
        Ok(Self { items })
    }

    /// Whether `remove` would actually drop an entry.
    pub fn can_remove(&self) -> bool {
        self.items.len() > 1
    }

    /// Drops the entry at `index`. Removing the last remaining entry is a no-op.
    pub fn remove(&self, index: usize) -> Result<Self, FormError> {
        self.check(index)?;
        if !self.can_remove() {
            debug!("Refusing to remove the only remaining entry");
            return Ok(self.clone());
        }
        let mut items = self.items.clone();
        items.remove(index);
        Ok(Self { items })
    }

    fn check(&self, index: usize) -> Result<(), FormError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(FormError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<T: Entry> Default for EntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
