use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{event, Level};

use crate::DEFAULT_MAX_UNUSED_SLOTS;

///
/// A handle to an entry of a [`Cache`]. References are only valid as long as the entry
/// is stored in the cache; using a reference to an entry that has been reclaimed panics.
///
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CacheRef {
    index: usize,
    generation: u32
}

impl CacheRef {

    pub fn index(&self) -> usize {
        self.index
    }
}

struct Slot<T> {
    content: Option<Arc<T>>,
    hash: u64,
    usage: usize,
    generation: u32,
    activity: f64
}

struct CacheState<T> {
    slots: Vec<Slot<T>>,
    free_slots: Vec<usize>,
    buckets: HashMap<u64, Vec<usize>>,
    unused: usize
}

impl<T> CacheState<T> {

    fn slot(&self, r: CacheRef) -> &Slot<T> {
        let slot = &self.slots[r.index];
        assert!(slot.generation == r.generation && slot.content.is_some(), "use of reclaimed cache entry {}", r.index);
        return slot;
    }

    fn slot_mut(&mut self, r: CacheRef) -> &mut Slot<T> {
        let slot = &mut self.slots[r.index];
        assert!(slot.generation == r.generation && slot.content.is_some(), "use of reclaimed cache entry {}", r.index);
        return slot;
    }

    fn find_index(&self, content: &T, hash: u64) -> Option<usize>
        where T: Eq
    {
        self.buckets.get(&hash)?.iter().copied().find(|i| self.slots[*i].content.as_deref() == Some(content))
    }

    fn remove_from_bucket(&mut self, index: usize, hash: u64) {
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            bucket.retain(|i| *i != index);
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
        }
    }

    ///
    /// Removes the entry at `index` from the cache, and returns its content, which should
    /// only be dropped after the lock on the cache has been released.
    ///
    fn reclaim(&mut self, index: usize) -> Option<Arc<T>> {
        let hash = self.slots[index].hash;
        self.remove_from_bucket(index, hash);
        let slot = &mut self.slots[index];
        debug_assert!(slot.usage == 0);
        slot.generation = slot.generation.wrapping_add(1);
        slot.activity = 0.;
        self.free_slots.push(index);
        self.unused -= 1;
        return slot.content.take();
    }

    ///
    /// Reclaims unused entries, the least active ones first, until at most `keep` unused entries
    /// are left.
    ///
    fn reclaim_unused(&mut self, keep: usize) -> Vec<Arc<T>> {
        let mut candidates = self.slots.iter().enumerate()
            .filter(|(_, slot)| slot.content.is_some() && slot.usage == 0)
            .map(|(i, slot)| (slot.activity, i))
            .collect::<Vec<_>>();
        candidates.sort_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs));
        let remove_count = self.unused.saturating_sub(keep);
        let removed = candidates.into_iter().take(remove_count).filter_map(|(_, i)| self.reclaim(i)).collect::<Vec<_>>();
        event!(Level::DEBUG, reclaimed = removed.len(), remaining = self.slots.len() - self.free_slots.len(), "cache_reclaim");
        return removed;
    }
}

///
/// A thread-safe hash-consing store. Every distinct value (w.r.t. [`Eq`]) is stored at most
/// once, and accessed through a [`CacheRef`]. Each entry has a usage count, which is managed
/// through [`Cache::reg()`] and [`Cache::dereg()`]. Entries with usage count zero are kept for
/// later reuse, until the number of such unused entries exceeds a threshold. Then the least
/// active half of them is reclaimed, where the activity of an entry is raised by
/// [`Cache::strengthen_activity()`].
///
/// All operations are mutually exclusive. Values are hashed outside of the lock, thus the
/// implementation of [`Hash`] of `T` may use the cache. However, values are compared for
/// equality while the lock is held, so the implementation of [`Eq`] must not use the cache.
/// Values are never dropped while the lock is held, so dropping a value may use the cache.
///
/// # Example
/// ```
/// # use factorized_poly::cache::*;
/// let cache = Cache::new();
/// let (first, inserted) = cache.cache("hello".to_owned());
/// assert!(inserted);
/// let (second, inserted) = cache.cache("hello".to_owned());
/// assert!(!inserted);
/// assert_eq!(first, second);
/// assert_eq!(2, cache.usage(first));
/// assert_eq!("hello", cache.get(first).as_str());
/// ```
///
pub struct Cache<T> {
    state: Mutex<CacheState<T>>,
    max_unused: usize
}

fn hash_content<T: Hash>(content: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    return hasher.finish();
}

impl<T: Hash + Eq> Cache<T> {

    pub fn new() -> Self {
        Self::with_max_unused(DEFAULT_MAX_UNUSED_SLOTS)
    }

    ///
    /// Creates a new cache that reclaims entries with usage count zero as soon as there are
    /// more than `max_unused` of them.
    ///
    pub fn with_max_unused(max_unused: usize) -> Self {
        Cache {
            state: Mutex::new(CacheState { slots: Vec::new(), free_slots: Vec::new(), buckets: HashMap::new(), unused: 0 }),
            max_unused
        }
    }

    fn lock(&self) -> MutexGuard<CacheState<T>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner()
        }
    }

    ///
    /// Stores `content` in the cache, unless an equal value is already stored, and registers
    /// one usage of the entry. Returns the reference to the entry and whether `content` was
    /// newly inserted. If it was not inserted, `content` is dropped.
    ///
    pub fn cache(&self, content: T) -> (CacheRef, bool) {
        let hash = hash_content(&content);
        let mut state = self.lock();
        if let Some(index) = state.find_index(&content, hash) {
            let slot = &mut state.slots[index];
            let was_unused = slot.usage == 0;
            slot.usage += 1;
            let result = CacheRef { index, generation: slot.generation };
            if was_unused {
                state.unused -= 1;
            }
            event!(Level::TRACE, index = index, "cache_hit");
            drop(state);
            drop(content);
            return (result, false);
        }
        let slot = Slot { content: Some(Arc::new(content)), hash, usage: 1, generation: 0, activity: 0. };
        let index = if let Some(index) = state.free_slots.pop() {
            let generation = state.slots[index].generation;
            state.slots[index] = Slot { generation, ..slot };
            index
        } else {
            state.slots.push(slot);
            state.slots.len() - 1
        };
        state.buckets.entry(hash).or_insert_with(Vec::new).push(index);
        event!(Level::TRACE, index = index, "cache_insert");
        return (CacheRef { index, generation: state.slots[index].generation }, true);
    }

    ///
    /// Returns a reference to the entry equal to `content`, if there is one. As opposed to
    /// [`Cache::cache()`], this does not register a usage.
    ///
    pub fn find(&self, content: &T) -> Option<CacheRef> {
        let hash = hash_content(content);
        let state = self.lock();
        let index = state.find_index(content, hash)?;
        return Some(CacheRef { index, generation: state.slots[index].generation });
    }

    ///
    /// Registers one more usage of the given entry.
    ///
    pub fn reg(&self, r: CacheRef) {
        let mut state = self.lock();
        let slot = state.slot_mut(r);
        slot.usage += 1;
        if slot.usage == 1 {
            state.unused -= 1;
        }
    }

    ///
    /// Deregisters one usage of the given entry. If the usage count drops to zero, the entry
    /// becomes a candidate for reclamation.
    ///
    pub fn dereg(&self, r: CacheRef) {
        let mut state = self.lock();
        let slot = state.slot_mut(r);
        assert!(slot.usage > 0, "deregistering cache entry {} without usages", r.index);
        slot.usage -= 1;
        if slot.usage == 0 {
            state.unused += 1;
        }
        let removed = if state.unused > self.max_unused {
            state.reclaim_unused(self.max_unused / 2)
        } else {
            Vec::new()
        };
        drop(state);
        drop(removed);
    }

    ///
    /// Reclaims all entries with usage count zero. Dropping the content of a reclaimed entry
    /// may cause other entries to become unused, these are reclaimed as well.
    ///
    pub fn clean(&self) {
        loop {
            let mut state = self.lock();
            let removed = state.reclaim_unused(0);
            drop(state);
            if removed.is_empty() {
                return;
            }
            drop(removed);
        }
    }

    ///
    /// Returns the content of the given entry. Note that [`Cache::modify()`] fails as long
    /// as the returned value is alive.
    ///
    pub fn get(&self, r: CacheRef) -> Arc<T> {
        let state = self.lock();
        return state.slot(r).content.clone().unwrap();
    }

    ///
    /// Modifies the content of the given entry in place, and returns the result of `f`.
    /// The entry is not moved to its new hash bucket, this requires a call to [`Cache::rehash()`].
    ///
    /// The cache is locked while `f` runs, thus `f` must neither use the cache nor drop a
    /// value whose destructor does. To replace a part of the content, return the old value
    /// from `f`, it is then dropped by the caller after the lock has been released.
    ///
    /// Panics if the content is currently shared, i.e. a value returned by [`Cache::get()`]
    /// is still alive.
    ///
    pub fn modify<F, R>(&self, r: CacheRef, f: F) -> R
        where F: FnOnce(&mut T) -> R
    {
        match self.try_modify(r, f) {
            Some(result) => result,
            None => panic!("cannot modify cache entry {}, since its content is shared", r.index)
        }
    }

    ///
    /// Like [`Cache::modify()`], but returns `None` instead of panicking if the content is
    /// currently shared.
    ///
    pub fn try_modify<F, R>(&self, r: CacheRef, f: F) -> Option<R>
        where F: FnOnce(&mut T) -> R
    {
        let mut state = self.lock();
        let content = state.slot_mut(r).content.as_mut().unwrap();
        match Arc::get_mut(content) {
            Some(content) => Some(f(content)),
            None => {
                // values captured by `f` may use the cache when dropped
                drop(state);
                drop(f);
                None
            }
        }
    }

    ///
    /// Recomputes the hash of the given entry, and moves it to the corresponding bucket.
    /// This must be called after [`Cache::modify()`] changed the hash of the content.
    ///
    pub fn rehash(&self, r: CacheRef) {
        let content = self.get(r);
        let new_hash = hash_content(&*content);
        drop(content);
        let mut state = self.lock();
        let old_hash = state.slot(r).hash;
        if old_hash == new_hash {
            return;
        }
        state.remove_from_bucket(r.index, old_hash);
        state.buckets.entry(new_hash).or_insert_with(Vec::new).push(r.index);
        state.slots[r.index].hash = new_hash;
        event!(Level::TRACE, index = r.index, "cache_rehash");
    }

    ///
    /// Raises the activity of the given entry. When unused entries are reclaimed, the least
    /// active ones are reclaimed first.
    ///
    pub fn strengthen_activity(&self, r: CacheRef) {
        let mut state = self.lock();
        state.slot_mut(r).activity += 1.;
    }

    pub fn usage(&self, r: CacheRef) -> usize {
        self.lock().slot(r).usage
    }

    ///
    /// Returns the number of stored entries, including those with usage count zero.
    ///
    pub fn len(&self) -> usize {
        let state = self.lock();
        return state.slots.len() - state.free_slots.len();
    }

    ///
    /// Returns the number of stored entries with usage count zero.
    ///
    pub fn unused_len(&self) -> usize {
        self.lock().unused
    }
}

impl<T: Hash + Eq> Default for Cache<T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Cache<T> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").field("max_unused", &self.max_unused).finish()
    }
}

#[cfg(test)]
use std::sync::OnceLock;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
static REENTRANT_CACHE: OnceLock<Cache<ReentrantHash>> = OnceLock::new();

///
/// A value whose hash function accesses the cache it is stored in.
///
#[cfg(test)]
#[derive(PartialEq, Eq, Debug)]
struct ReentrantHash(i32);

#[cfg(test)]
impl Hash for ReentrantHash {

    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if let Some(cache) = REENTRANT_CACHE.get() {
            assert!(cache.len() < 8);
        }
        self.0.hash(state);
    }
}

#[test]
fn test_cache_returns_same_entry() {
    LogAlgorithmSubscriber::init_test();
    let cache = Cache::new();
    let (a, inserted_a) = cache.cache(vec![1, 2, 3]);
    let (b, inserted_b) = cache.cache(vec![4]);
    let (c, inserted_c) = cache.cache(vec![1, 2, 3]);
    assert!(inserted_a && inserted_b && !inserted_c);
    assert_eq!(a, c);
    assert!(a != b);
    assert_eq!(2, cache.usage(a));
    assert_eq!(1, cache.usage(b));
    assert_eq!(2, cache.len());
    assert_eq!(Some(b), cache.find(&vec![4]));
    assert_eq!(None, cache.find(&vec![5]));
    assert_eq!(1, cache.usage(b));
}

#[test]
fn test_cache_usage_counting() {
    LogAlgorithmSubscriber::init_test();
    let cache = Cache::new();
    let (a, _) = cache.cache("a".to_owned());
    cache.reg(a);
    assert_eq!(2, cache.usage(a));
    cache.dereg(a);
    cache.dereg(a);
    assert_eq!(0, cache.usage(a));
    assert_eq!(1, cache.unused_len());
    assert_eq!(1, cache.len());

    // unused entries can be revived
    let (b, inserted) = cache.cache("a".to_owned());
    assert!(!inserted);
    assert_eq!(a, b);
    assert_eq!(0, cache.unused_len());
    cache.dereg(b);
    cache.clean();
    assert_eq!(0, cache.len());
    assert_eq!(0, cache.unused_len());
}

#[test]
#[should_panic]
fn test_cache_stale_reference() {
    let cache = Cache::new();
    let (a, _) = cache.cache(1);
    cache.dereg(a);
    cache.clean();
    let _ = cache.cache(2);
    cache.reg(a);
}

#[test]
fn test_cache_reclaims_least_active() {
    LogAlgorithmSubscriber::init_test();
    let cache = Cache::with_max_unused(4);
    let refs = (0..5).map(|i| cache.cache(i).0).collect::<Vec<_>>();
    cache.strengthen_activity(refs[1]);
    cache.strengthen_activity(refs[3]);
    for r in &refs[..4] {
        cache.dereg(*r);
    }
    assert_eq!(4, cache.unused_len());
    assert_eq!(5, cache.len());
    cache.dereg(refs[4]);
    // 5 unused entries exceed the threshold, so only the two most active ones are kept
    assert_eq!(2, cache.unused_len());
    assert_eq!(2, cache.len());
    assert_eq!(Some(refs[1]), cache.find(&1));
    assert_eq!(Some(refs[3]), cache.find(&3));
    assert_eq!(None, cache.find(&0));

    // reclaimed slots are reused with a new generation
    let (new_ref, inserted) = cache.cache(7);
    assert!(inserted);
    assert!(!refs.contains(&new_ref));
    assert_eq!(7, *cache.get(new_ref));
}

#[test]
fn test_cache_modify_and_rehash() {
    LogAlgorithmSubscriber::init_test();
    let cache = Cache::new();
    let (a, _) = cache.cache(vec![1]);
    let old = cache.modify(a, |content| std::mem::replace(content, vec![2, 3]));
    assert_eq!(vec![1], old);
    assert_eq!(vec![2, 3], *cache.get(a));
    cache.rehash(a);
    assert_eq!(Some(a), cache.find(&vec![2, 3]));
    assert_eq!(None, cache.find(&vec![1]));

    let (b, inserted) = cache.cache(vec![2, 3]);
    assert!(!inserted);
    assert_eq!(a, b);
}

#[test]
fn test_cache_modify_shared() {
    LogAlgorithmSubscriber::init_test();
    let cache = Cache::new();
    let (a, _) = cache.cache(vec![1]);
    let content = cache.get(a);
    assert_eq!(None, cache.try_modify(a, |content| content.push(2)));
    drop(content);
    assert_eq!(Some(()), cache.try_modify(a, |content| content.push(2)));
    assert_eq!(vec![1, 2], *cache.get(a));
}

#[test]
fn test_cache_concurrent_use() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(Cache::new());
    let threads = (0..4).map(|_| {
        let cache = cache.clone();
        std::thread::spawn(move || {
            (0..100).map(|i| cache.cache(i % 10).0).collect::<Vec<_>>()
        })
    }).collect::<Vec<_>>();
    let refs = threads.into_iter().flat_map(|t| t.join().unwrap()).collect::<Vec<_>>();
    assert_eq!(10, cache.len());
    for i in 0..10 {
        assert_eq!(40, cache.usage(cache.find(&i).unwrap()));
    }
    for r in refs {
        cache.dereg(r);
    }
    assert_eq!(10, cache.unused_len());
}

#[test]
fn test_cache_hash_may_access_cache() {
    LogAlgorithmSubscriber::init_test();
    let cache = REENTRANT_CACHE.get_or_init(Cache::new);
    let (a, inserted) = cache.cache(ReentrantHash(1));
    assert!(inserted);
    let (b, _) = cache.cache(ReentrantHash(2));
    assert_eq!(None, cache.find(&ReentrantHash(3)));
    let previous = cache.modify(a, |content| std::mem::replace(content, ReentrantHash(3)));
    assert_eq!(ReentrantHash(1), previous);
    cache.rehash(a);
    assert_eq!(Some(a), cache.find(&ReentrantHash(3)));
    assert_eq!(Some(b), cache.find(&ReentrantHash(2)));
    assert_eq!(None, cache.find(&ReentrantHash(1)));
}
