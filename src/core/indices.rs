use std::hash::Hash;

use hashbrown::HashMap;

use crate::types::ResultId;

/// Secondary index from a key to result ids, kept in ascending id order.
pub type VecIndex<K> = HashMap<K, Vec<ResultId>>;

pub(crate) fn index_insert<K: Eq + Hash>(index: &mut VecIndex<K>, key: K, id: ResultId) {
    let ids = index.entry(key).or_default();
    if let Err(pos) = ids.binary_search(&id) {
        ids.insert(pos, id);
    }
}

pub(crate) fn index_remove<K: Eq + Hash>(index: &mut VecIndex<K>, key: &K, id: ResultId) {
    let Some(ids) = index.get_mut(key) else {
        return;
    };
    if let Ok(pos) = ids.binary_search(&id) {
        ids.remove(pos);
    }
    if ids.is_empty() {
        index.remove(key);
    }
}
