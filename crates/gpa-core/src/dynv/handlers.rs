//! Handler registry and per-file handler tables.

use super::ValueType;

/// Registry of value types a writer advertises and a reader understands
///
/// A record field refers to its type by index into the handler map written
/// at the top of the file, so the registry order is part of that file's
/// encoding (but not of the format: readers rebuild the mapping by name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerMap {
    types: Vec<ValueType>,
}

impl HandlerMap {
    /// Registry containing the given types, duplicates removed
    #[must_use]
    pub fn new(types: impl IntoIterator<Item = ValueType>) -> Self {
        let mut map = Self { types: Vec::new() };
        for ty in types {
            if !map.types.contains(&ty) {
                map.types.push(ty);
            }
        }
        map
    }

    /// Index a field of type `ty` is written with
    #[must_use]
    pub fn index_of(&self, ty: ValueType) -> Option<u32> {
        self.types.iter().position(|&t| t == ty).and_then(|i| u32::try_from(i).ok())
    }

    /// True if `ty` is registered
    #[must_use]
    pub fn contains(&self, ty: ValueType) -> bool {
        self.types.contains(&ty)
    }

    /// Registered types in index order
    #[must_use]
    pub fn types(&self) -> &[ValueType] {
        &self.types
    }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for HandlerMap {
    fn default() -> Self {
        Self::new(ValueType::BUILTIN)
    }
}

/// Mapping from on-disk handler indices to locally known types
///
/// Built while reading a handler map chunk. Slots for type names this build
/// does not know are `None`; any record field using them fails to decode.
/// The default table is empty, which is what a reader uses when a color list
/// arrives before any handler map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerTable {
    slots: Vec<Option<ValueType>>,
}

impl HandlerTable {
    /// Resolve persisted type names against `registry`
    pub fn from_names<'a>(registry: &HandlerMap, names: impl IntoIterator<Item = &'a str>) -> Self {
        let slots = names
            .into_iter()
            .map(|name| ValueType::from_name(name).filter(|&ty| registry.contains(ty)))
            .collect();
        Self { slots }
    }

    /// Table matching a registry one-to-one
    #[must_use]
    pub fn identity(registry: &HandlerMap) -> Self {
        Self { slots: registry.types().iter().copied().map(Some).collect() }
    }

    /// Type for an on-disk handler index
    #[must_use]
    pub fn resolve(&self, index: u64) -> Option<ValueType> {
        usize::try_from(index).ok().and_then(|i| self.slots.get(i).copied().flatten())
    }

    /// Number of slots (known or not)
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the table has no slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots this build could not resolve
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }
}
