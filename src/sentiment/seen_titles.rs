use std::collections::{HashSet, VecDeque};

/// Bounded set of already-processed news titles.
///
/// Once `capacity` is reached the oldest title is forgotten, so memory stays
/// flat in a long-running process.  A forgotten title counts as unseen again.
#[derive(Debug)]
pub struct SeenTitles {
    set: HashSet<String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl SeenTitles {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            set: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.set.contains(title)
    }

    /// Record `title`.  Returns `false` if it was already present.
    pub fn insert(&mut self, title: &str) -> bool {
        if self.set.contains(title) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.set.remove(&oldest);
            }
        }
        self.set.insert(title.to_string());
        self.order.push_back(title.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}
