/// An item in a [`PriorityQueue`], keyed by `(frequency, sequence)`.
///
/// `sequence` is assigned by whoever pushes the entry and must increase
/// monotonically; it breaks ties between equal frequencies first-in first-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapEntry<T> {
    pub frequency: usize,
    pub sequence: u64,
    pub item: T,
}

impl<T> HeapEntry<T> {
    pub fn new(frequency: usize, sequence: u64, item: T) -> Self {
        Self {
            frequency,
            sequence,
            item,
        }
    }

    fn key(&self) -> (usize, u64) {
        (self.frequency, self.sequence)
    }
}

/// Array-backed binary min-heap.
///
/// Pushes keep the heap ordered; see [`PriorityQueue::pop`] for where pops
/// fall short of that.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<HeapEntry<T>>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek(&self) -> Option<&HeapEntry<T>> {
        self.entries.first()
    }

    pub fn push(&mut self, entry: HeapEntry<T>) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove the root entry, or `None` if the queue is empty.
    ///
    /// The root holds the smallest key until the first pop; after that it is
    /// the smallest only if every earlier sift-down settled the heap.
    pub fn pop(&mut self) -> Option<HeapEntry<T>> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        self.sift_down(0);
        min
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[parent].key() <= self.entries[i].key() {
                break;
            }
            self.entries.swap(parent, i);
            i = parent;
        }
    }

    /// Move the entry at `i` down while it is greater than its left child,
    /// swapping with whichever child is smaller.
    ///
    /// An entry no greater than its left child stays put even if the right
    /// child is smaller, so after a pop the root is not always the minimum.
    /// Trees built on this queue must stay bit-identical to existing
    /// encodings, which depend on exactly this merge order.
    fn sift_down(&mut self, mut i: usize) {
        let n = self.entries.len();
        let mut child = 2 * i + 1;

        while child < n && self.entries[i].key() > self.entries[child].key() {
            if child + 1 < n && self.entries[child].key() > self.entries[child + 1].key() {
                child += 1;
            }
            self.entries.swap(i, child);
            i = child;
            child = 2 * i + 1;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
