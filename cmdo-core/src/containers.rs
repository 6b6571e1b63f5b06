//! Container aliases used by the command tree and completion results.

use hashbrown::{HashMap as HbMap, HashSet as HbSet};

/// Hash map used by tree children and per-kind lookups.
pub type HotMap<K, V> = HbMap<K, V>;

/// Hash set used for completion suggestions.
pub type HotSet<T> = HbSet<T>;
