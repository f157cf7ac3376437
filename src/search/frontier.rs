use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

/// Ordered container of not yet expanded search nodes.
///
/// The variants only differ in the order in which [`Frontier::remove`] hands out
/// items. Priorities are ignored by the unordered variants.
pub trait Frontier<T> {
    fn insert(&mut self, item: T, priority: f64);
    fn remove(&mut self) -> Option<T>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Stack<T> {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for Stack<T> {
    fn insert(&mut self, item: T, _: f64) {
        self.push(item);
    }
    fn remove(&mut self) -> Option<T> {
        self.pop()
    }
    fn len(&self) -> usize {
        self.items.len()
    }
}

/// First in, first out.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Queue<T> {
        Queue {
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for Queue<T> {
    fn insert(&mut self, item: T, _: f64) {
        self.push(item);
    }
    fn remove(&mut self) -> Option<T> {
        self.pop()
    }
    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Heap entry ordered by priority, then by insertion sequence.
struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-priority queue.
///
/// Items with equal priority are popped in the order they were pushed.
/// There is no decrease-key, stale entries are expected to be skipped by the caller.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> PriorityQueue<T> {
        PriorityQueue {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn push(&mut self, item: T, priority: f64) {
        self.heap.push(Reverse(Entry {
            priority,
            seq: self.seq,
            item,
        }));
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for PriorityQueue<T> {
    fn insert(&mut self, item: T, priority: f64) {
        self.push(item, priority);
    }
    fn remove(&mut self) -> Option<T> {
        self.pop()
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}
