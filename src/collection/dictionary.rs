//! A Dictionary.
//!
//! The keys and the values are kept in two `DynamicVector`s, in lockstep: the key at index `i` is associated with the
//! value at index `i`. Lookups scan the keys linearly, in insertion order, so that the first entry inserted with a
//! given key shadows any later one.

use core::{borrow::Borrow, fmt, iter::FusedIterator, slice};

use crate::{
    alloc::handle_alloc_error,
    allocator::Global,
    collection::DynamicVector,
    error::{AllocError, Error},
    interface::Allocator,
};

/// An association list, with keys and values stored in separate arrays.
///
/// Entries are only ever appended; duplicate keys are permitted, and lookups resolve to the first of them.
///
/// ```
/// use repono::{Dictionary, Error};
///
/// let mut dictionary = Dictionary::new();
///
/// dictionary.add_entry("a", 1).unwrap();
/// dictionary.add_entry("b", 2).unwrap();
/// dictionary.add_entry("a", 5).unwrap();
///
/// assert_eq!(3, dictionary.size());
/// assert_eq!(Ok(&1), dictionary.lookup("a"));
/// assert_eq!(Err(Error::KeyNotFound), dictionary.lookup("c"));
/// ```
pub struct Dictionary<K, V, A: Allocator = Global> {
    //  Invariant: `keys.len() == values.len()`.
    keys: DynamicVector<K, A>,
    values: DynamicVector<V, A>,
}

impl<K, V> Dictionary<K, V> {
    /// Creates a new, empty, instance.
    ///
    /// No memory is allocated until the first entry is added.
    pub const fn new() -> Self {
        let keys = DynamicVector::new();
        let values = DynamicVector::new();

        Self { keys, values }
    }
}

impl<K, V, A: Allocator + Clone> Dictionary<K, V, A> {
    /// Creates a new, empty, instance drawing both its arrays from `allocator`.
    ///
    /// No memory is allocated until the first entry is added.
    pub fn new_in(allocator: A) -> Self {
        let keys = DynamicVector::new_in(allocator.clone());
        let values = DynamicVector::new_in(allocator);

        Self { keys, values }
    }

    /// Creates a new, empty, instance able to hold `capacity` entries without reallocating.
    ///
    /// #   Errors
    ///
    /// Returns an error if either allocation fails.
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
        let keys = DynamicVector::with_capacity_in(capacity, allocator.clone())?;
        let values = DynamicVector::with_capacity_in(capacity, allocator)?;

        Ok(Self { keys, values })
    }
}

impl<K, V, A: Allocator> Dictionary<K, V, A> {
    /// Returns the number of entries, duplicates included.
    pub const fn size(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of entries, duplicates included.
    pub const fn len(&self) -> usize {
        self.size()
    }

    /// Returns whether the dictionary is empty.
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns a reference to the allocator.
    pub const fn allocator(&self) -> &A {
        self.keys.allocator()
    }

    /// Returns the keys, in insertion order.
    pub fn keys(&self) -> &[K] {
        self.keys.as_slice()
    }

    /// Returns the values, in insertion order.
    pub fn values(&self) -> &[V] {
        self.values.as_slice()
    }

    /// Returns the values, in insertion order.
    pub fn values_mut(&mut self) -> &mut [V] {
        self.values.as_mut_slice()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.keys.iter().zip(self.values.iter()))
    }

    /// Removes all entries.
    ///
    /// The capacity of the arrays is left unchanged.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    /// Appends an entry associating `key` with `value`.
    ///
    /// An existing entry with an equal key is left as is, and keeps shadowing the new one.
    ///
    /// #   Errors
    ///
    /// Returns an error if either array fails to grow, in which case no entry is added, and `key` and `value` are
    /// dropped.
    pub fn add_entry(&mut self, key: K, value: V) -> Result<(), AllocError> {
        debug_assert_eq!(self.keys.len(), self.values.len());

        self.keys.reserve(1)?;
        self.values.reserve(1)?;

        //  Cannot fail: both arrays have room for one more element.
        self.keys.try_push_back(key)?;
        self.values.try_push_back(value)?;

        Ok(())
    }
}

//
//  Lookup
//

impl<K, V, A: Allocator> Dictionary<K, V, A> {
    /// Returns the index of the first entry whose key is equal to `key`, if any.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.keys.iter().position(|k| k.borrow() == key)
    }

    /// Returns whether any entry has a key equal to `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Returns the value of the first entry whose key is equal to `key`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::KeyNotFound` if no key is equal to `key`.
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value of the first entry whose key is equal to `key`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::KeyNotFound` if no key is equal to `key`.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value of the first entry whose key is equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self.position(key)?;

        self.values.get(index)
    }

    /// Returns the value of the first entry whose key is equal to `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self.position(key)?;

        self.values.get_mut(index)
    }
}

impl<K, V, A: Allocator> Dictionary<K, V, A> {
    /// Clones the dictionary, including its allocator.
    ///
    /// #   Errors
    ///
    /// Returns an error if either allocation fails.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        K: Clone,
        V: Clone,
        A: Clone,
    {
        let keys = self.keys.try_clone()?;
        let values = self.values.try_clone()?;

        Ok(Self { keys, values })
    }
}

impl<K: Clone, V: Clone, A: Allocator + Clone> Clone for Dictionary<K, V, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| handle_alloc_error(error))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, A: Allocator> fmt::Debug for Dictionary<K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, A: Allocator + Clone + Default> Default for Dictionary<K, V, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

//
//  Iteration
//

impl<K, V, A: Allocator> Extend<(K, V)> for Dictionary<K, V, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            if let Err(error) = self.add_entry(key, value) {
                handle_alloc_error(error)
            }
        }
    }
}

impl<K, V, A: Allocator + Clone + Default> FromIterator<(K, V)> for Dictionary<K, V, A> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut result = Self::default();

        result.extend(iter);

        result
    }
}

impl<'a, K, V, A: Allocator> IntoIterator for &'a Dictionary<K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a dictionary, in insertion order.
#[derive(Clone, Debug)]
pub struct Iter<'a, K, V>(core::iter::Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
