use std::collections::{btree_map::Entry, BTreeMap};

use super::types::Type;

/// Outcome of registering a use of a map against what is already known.
#[derive(Debug, PartialEq, Eq)]
pub enum Registration<'a, T: ?Sized> {
    /// First time the map was seen; the given value is now authoritative.
    Inserted,
    /// The map was seen before with the same value.
    Matched,
    /// The map was seen before with a different value, returned here.
    Conflict(&'a T),
}

/// Key-type signature of each map, fixed by the first reference to it.
#[derive(Debug, Default, Clone)]
pub struct MapSignatures {
    signatures: BTreeMap<String, Vec<Type>>,
}

impl MapSignatures {
    pub fn new() -> Self {
        MapSignatures::default()
    }

    pub fn register(&mut self, map: &str, args: &[Type]) -> Registration<'_, [Type]> {
        match self.signatures.entry(map.to_string()) {
            Entry::Vacant(entry) => {
                tracing::trace!(map, ?args, "registered map signature");
                entry.insert(args.to_vec());
                Registration::Inserted
            }
            Entry::Occupied(entry) => {
                let existing: &[Type] = entry.into_mut();
                if existing == args {
                    Registration::Matched
                } else {
                    Registration::Conflict(existing)
                }
            }
        }
    }

    pub fn get(&self, map: &str) -> Option<&[Type]> {
        self.signatures.get(map).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Type])> {
        self.signatures
            .iter()
            .map(|(name, args)| (name.as_str(), args.as_slice()))
    }
}

/// Value type held by each map, fixed by the first assignment to it.
#[derive(Debug, Default, Clone)]
pub struct MapValues {
    values: BTreeMap<String, Type>,
}

impl MapValues {
    pub fn new() -> Self {
        MapValues::default()
    }

    pub fn register(&mut self, map: &str, value: Type) -> Registration<'_, Type> {
        match self.values.entry(map.to_string()) {
            Entry::Vacant(entry) => {
                tracing::trace!(map, %value, "registered map value type");
                entry.insert(value);
                Registration::Inserted
            }
            Entry::Occupied(entry) => {
                let existing: &Type = entry.into_mut();
                if *existing == value {
                    Registration::Matched
                } else {
                    Registration::Conflict(existing)
                }
            }
        }
    }

    pub fn get(&self, map: &str) -> Option<Type> {
        self.values.get(map).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Type)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
