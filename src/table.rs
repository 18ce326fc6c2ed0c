//! Route table: one entry per `(method, normalized path)`.

use std::collections::HashMap;

use crate::handler::BoxedHandler;
use crate::method::Method;

/// Identifies one registration.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct RouteKey {
    pub(crate) method: Method,
    pub(crate) path: String,
}

/// The handlers of one route plus the number of middleware batches that were
/// registered before it. Only those batches run in front of it.
#[derive(Clone)]
pub(crate) struct RouteEntry {
    pub(crate) handlers: Vec<BoxedHandler>,
    pub(crate) cutoff: usize,
}

/// Routes in registration order with an index for exact lookups.
///
/// Registration order matters for pattern routes: they are tried first to
/// last. Re-registering a key replaces the entry in place.
#[derive(Clone, Default)]
pub(crate) struct RouteTable {
    entries: Vec<(RouteKey, RouteEntry)>,
    index: HashMap<RouteKey, usize>,
}

impl RouteTable {
    pub(crate) fn insert(&mut self, key: RouteKey, entry: RouteEntry) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = entry,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
    }

    pub(crate) fn get(&self, key: &RouteKey) -> Option<&RouteEntry> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&RouteKey, &RouteEntry)> {
        self.entries.iter().map(|(key, entry)| (key, entry))
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (RouteKey, RouteEntry)> {
        self.entries.into_iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
