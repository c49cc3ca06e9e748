//! Ordered pools of live entities
//!
//! Removal happens while walking from the last entry to the first, so erasing the
//! current index never shifts an entry that has not been visited yet.

/// Index of a live entry. Only valid until the next removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(usize);

/// What a sweep visitor decides for the entry it just saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Keep,
    Remove,
}

/// Live instances of one entity kind, in spawn order
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, item: T) -> Handle {
        self.items.push(item);
        Handle(self.items.len() - 1)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.items.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.items.get_mut(handle.0)
    }

    /// Erase in place, keeping the order of the rest
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        (handle.0 < self.items.len()).then(|| self.items.remove(handle.0))
    }

    /// Visit every entry back-to-front, erasing those the visitor rejects.
    /// Each surviving entry is visited exactly once.
    pub fn sweep<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T) -> Fate,
    {
        let mut i = self.items.len();
        while i > 0 {
            i -= 1;
            if visit(&mut self.items[i]) == Fate::Remove {
                self.items.remove(i);
            }
        }
    }

    /// First entry (in pool order) matching `pred`
    pub fn find<P: FnMut(&T) -> bool>(&self, pred: P) -> Option<Handle> {
        self.items.iter().position(pred).map(Handle)
    }

    pub fn for_each_alive<F: FnMut(&T)>(&self, visit: F) {
        self.items.iter().for_each(visit);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_visits_each_once() {
        let mut pool: Pool<u32> = (0..10).fold(Pool::new(), |mut p, i| {
            p.spawn(i);
            p
        });

        let mut seen = Vec::new();
        pool.sweep(|v| {
            seen.push(*v);
            if *v % 3 == 0 { Fate::Remove } else { Fate::Keep }
        });

        assert_eq!(seen, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        let left: Vec<u32> = pool.iter().copied().collect();
        assert_eq!(left, vec![1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_sweep_remove_all() {
        let mut pool = Pool::new();
        for i in 0..5 {
            pool.spawn(i);
        }
        pool.sweep(|_| Fate::Remove);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_spawn_get_remove() {
        let mut pool = Pool::new();
        let a = pool.spawn("a");
        let b = pool.spawn("b");
        assert_eq!(pool.get(b), Some(&"b"));
        assert_eq!(pool.remove(a), Some("a"));
        assert_eq!(pool.len(), 1);
        // `b` shifted down; the stale handle is now out of range
        assert_eq!(pool.get(b), None);
        assert_eq!(pool.remove(Handle(7)), None);
    }

    #[test]
    fn test_find_returns_first_match() {
        let mut pool = Pool::new();
        for v in [4, 7, 9, 7] {
            pool.spawn(v);
        }
        assert_eq!(pool.find(|v| *v == 7), Some(Handle(1)));
        assert_eq!(pool.find(|v| *v == 1), None);
    }

    #[test]
    fn test_sweep_can_mutate_survivors() {
        let mut pool = Pool::new();
        pool.spawn(1);
        pool.spawn(2);
        pool.sweep(|v| {
            *v *= 10;
            Fate::Keep
        });
        let mut total = 0;
        pool.for_each_alive(|v| total += *v);
        assert_eq!(total, 30);
    }
}
