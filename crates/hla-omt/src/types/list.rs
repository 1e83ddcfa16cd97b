// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-kind data type registries.
//!
//! A [`DataTypeList`] owns every instance of one data type kind. Entries get
//! two identities:
//!
//! - a **handle**, stable for the lifetime of the list and never reused, which
//!   is what other types and data elements store;
//! - a dense 0-based **display index**, recompacted on every erase (O(n)).
//!
//! An erased handle simply resolves to nothing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Stable reference to an entry of a [`DataTypeList<T>`].
pub struct Handle<T> {
    slot: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(slot: usize) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Raw slot number (diagnostics only).
    pub fn slot(self) -> usize {
        self.slot
    }
}

// Manual impls: the derives would require `T: Clone` etc.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.slot)
    }
}

/// Behaviour every data type kind provides to its owning list.
pub trait ListEntry: Sized {
    /// Kind label used in logs.
    const KIND: &'static str;

    /// Fresh, empty instance bound to `handle`.
    fn with_handle(handle: Handle<Self>) -> Self;

    fn name(&self) -> &str;

    fn set_index_in_list(&mut self, index: Option<usize>);
}

/// Owning registry for one data type kind.
#[derive(Debug)]
pub struct DataTypeList<T> {
    slots: Vec<Option<T>>,
    order: Vec<usize>,
}

impl<T> Default for DataTypeList<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<T: ListEntry> DataTypeList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty instance at the end of the list.
    ///
    /// The caller fills in name and metadata through the returned reference.
    pub fn create_data_type(&mut self) -> &mut T {
        let slot = self.slots.len();
        let mut entry = T::with_handle(Handle::new(slot));
        entry.set_index_in_list(Some(self.order.len()));
        self.order.push(slot);
        tracing::debug!(kind = T::KIND, slot, "created data type");
        self.slots.push(None);
        self.slots[slot].insert(entry)
    }

    /// Remove an instance; subsequent display indices shift down by one.
    pub fn erase_data_type(&mut self, handle: Handle<T>) -> Option<T> {
        let index = self.order.iter().position(|&slot| slot == handle.slot)?;
        self.order.remove(index);
        let mut erased = self.slots.get_mut(handle.slot)?.take()?;
        erased.set_index_in_list(None);
        for (i, &slot) in self.order.iter().enumerate().skip(index) {
            if let Some(Some(entry)) = self.slots.get_mut(slot) {
                entry.set_index_in_list(Some(i));
            }
        }
        tracing::debug!(kind = T::KIND, name = erased.name(), "erased data type");
        Some(erased)
    }

    /// Linear lookup by name.
    pub fn get_data_type(&self, name: &str) -> Option<&T> {
        self.iter().find(|entry| entry.name() == name)
    }

    pub fn get_data_type_mut(&mut self, name: &str) -> Option<&mut T> {
        let slot = self
            .order
            .iter()
            .copied()
            .find(|&slot| matches!(self.slots.get(slot), Some(Some(e)) if e.name() == name))?;
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Lookup by display index.
    pub fn get_data_type_by_index(&self, index: usize) -> Option<&T> {
        let slot = *self.order.get(index)?;
        self.get(Handle::new(slot))
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.slots.get(handle.slot)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.slots.get_mut(handle.slot)?.as_mut()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in display index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order
            .iter()
            .filter_map(move |&slot| self.slots.get(slot).and_then(Option::as_ref))
    }
}
