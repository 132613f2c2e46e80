//! Ordered registry of the named reference fields.

use std::sync::Arc;

use flowlines_core::{NamedField, VelocityField};
use indexmap::IndexMap;

use crate::analytic::{Doublet, Source, Uniform, Vortex};

/// One registry entry: a display name and its shared field.
#[derive(Clone)]
pub struct LibraryEntry {
    /// Display name, e.g. `"Vortex Flow"`.
    pub name: &'static str,
    /// The field itself.
    pub field: Arc<dyn VelocityField>,
}

impl LibraryEntry {
    /// Convert into a [`NamedField`] for consumers that report by name.
    pub fn to_named(&self) -> NamedField {
        NamedField::new(self.name, Arc::clone(&self.field))
    }
}

impl std::fmt::Debug for LibraryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Menu-keyed registry of analytic fields.
///
/// Insertion order is the menu order; the first entry is the default
/// used by selection fallbacks.
///
/// ```
/// use flowlines_fields::FieldLibrary;
///
/// let lib = FieldLibrary::standard();
/// assert_eq!(lib.get("1").unwrap().name, "Vortex Flow");
/// assert_eq!(lib.default_entry().name, "Vortex Flow");
/// assert!(lib.get("9").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct FieldLibrary {
    entries: IndexMap<&'static str, LibraryEntry>,
    default: LibraryEntry,
}

impl FieldLibrary {
    /// The four reference flows under keys `"1"` through `"4"`.
    pub fn standard() -> Self {
        let vortex = LibraryEntry {
            name: "Vortex Flow",
            field: Arc::new(Vortex),
        };
        let mut entries = IndexMap::new();
        entries.insert("1", vortex.clone());
        entries.insert(
            "2",
            LibraryEntry {
                name: "Uniform Flow",
                field: Arc::new(Uniform),
            },
        );
        entries.insert(
            "3",
            LibraryEntry {
                name: "Source Flow",
                field: Arc::new(Source),
            },
        );
        entries.insert(
            "4",
            LibraryEntry {
                name: "Doublet Flow",
                field: Arc::new(Doublet),
            },
        );
        Self {
            entries,
            default: vortex,
        }
    }

    /// Look up an entry by menu key.
    pub fn get(&self, key: &str) -> Option<&LibraryEntry> {
        self.entries.get(key)
    }

    /// The default entry (vortex).
    pub fn default_entry(&self) -> &LibraryEntry {
        &self.default
    }

    /// Iterate `(key, entry)` in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LibraryEntry)> {
        self.entries.iter().map(|(k, e)| (*k, e))
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
