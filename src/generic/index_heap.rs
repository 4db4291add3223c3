/*!
A heap on some subset of elements with fixed indicies.

In other words, a heap backed by a vector with a companion vector which tracks the current location of each index on the heap.

The backing vector of values stays constant in size, and so the heap acts as a store of values, some of which are *active* on the heap.

[IndexHeap] is used by the [exact oracle](crate::oracle::cdcl) as a store of atom activity, as an unvalued atom with the most activity is a useful choice of decision.

```rust
# use stream_sat::generic::index_heap::IndexHeap;
let mut test_heap = IndexHeap::default();

test_heap.add(600, 10);
test_heap.add(0, 70);

test_heap.activate(600);
test_heap.activate(0);

assert_eq!(test_heap.count(), 601);
assert_eq!(test_heap.value_at(5), &i32::default());

assert_eq!(test_heap.pop_max(), Some(0));
assert_eq!(test_heap.pop_max(), Some(600));

assert!(test_heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    values: Vec<V>,

    /// For each value index, the position of the index on the heap, if active.
    position_in_heap: Vec<Option<usize>>,

    /// Value indicies, arranged as a max heap up to `limit`.
    heap: Vec<usize>,

    /// The count of active indicies.
    limit: usize,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position_in_heap: Vec::default(),
            heap: Vec::default(),
            limit: 0,
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Index `value` with `value_index`.
    /// Returns true if `value_index` was a fresh index, false otherwise.
    /// To *activate* `value_index` on the heap [activate]([IndexHeap::activate]) should be called after this method.
    ///
    /// Note, the method grows the structure to the size required for `value_index` to be a (transparent) index.
    pub fn add(&mut self, value_index: usize, value: V) -> bool {
        let fresh = self.values.len() <= value_index;
        while self.values.len() <= value_index {
            self.values.push(V::default());
            self.position_in_heap.push(None);
            self.heap.push(usize::MAX);
        }
        self.values[value_index] = value;
        if !fresh {
            self.heapify_if_active(value_index);
        }
        fresh
    }

    /// Remove `value_index` from the heap, if present.
    /// Returns true if `value_index` was removed, false otherwise.
    pub fn remove(&mut self, value_index: usize) -> bool {
        let Some(heap_index) = self.heap_index(value_index) else {
            return false;
        };

        self.limit -= 1;
        if heap_index != self.limit {
            let last = self.heap[self.limit];
            self.heap.swap(heap_index, self.limit);
            self.position_in_heap[last] = Some(heap_index);
            self.position_in_heap[value_index] = None;
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        } else {
            self.position_in_heap[value_index] = None;
        }
        true
    }

    /// Activate the value on the heap at `value_index`.
    /// Returns true if the value was inactive, false otherwise.
    pub fn activate(&mut self, value_index: usize) -> bool {
        match self.heap_index(value_index) {
            None => {
                self.position_in_heap[value_index] = Some(self.limit);
                self.heap[self.limit] = value_index;
                self.limit += 1;
                self.heapify_up(self.limit - 1);
                true
            }

            Some(_) => false,
        }
    }

    /// Whether `value_index` is active on the heap.
    pub fn is_active(&self, value_index: usize) -> bool {
        self.heap_index(value_index).is_some()
    }

    /// Heapify (ensure invariants of the heap are upheld) if `value_index` is active.
    pub fn heapify_if_active(&mut self, value_index: usize) {
        if let Some(heap_index) = self.heap_index(value_index) {
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        }
    }

    /// Peek at the maximum index of the heap.
    pub fn peek_max(&self) -> Option<usize> {
        match self.limit {
            0 => None,
            _ => Some(self.heap[0]),
        }
    }

    /// Pop the maximum index off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max_value_index = self.peek_max()?;
        self.remove(max_value_index);
        Some(max_value_index)
    }

    /// Heapify (ensure invariants of the heap are upheld) the heap.
    pub fn heapify(&mut self) {
        for heap_index in (0..self.limit / 2).rev() {
            self.heapify_down(heap_index)
        }
    }

    /// Return the value indexed by `value_index`.
    pub fn value_at(&self, value_index: usize) -> &V {
        &self.values[value_index]
    }

    /// Apply `f` to the value at `value_index`, and restore the heap.
    pub fn apply_to_value(&mut self, value_index: usize, f: impl Fn(&V) -> V) {
        self.values[value_index] = f(&self.values[value_index]);
        self.heapify_if_active(value_index);
    }

    /// Apply `f` to all (indexed) values.
    ///
    /// The heap is not restored, as order preserving functions (such as scaling) are expected.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value)
        }
    }

    /// A count of values indexed by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// True if no index is active, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    fn heap_index(&self, value_index: usize) -> Option<usize> {
        self.position_in_heap.get(value_index).copied().flatten()
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.values[self.heap[a]] > self.values[self.heap[b]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position_in_heap[self.heap[a]] = Some(a);
        self.position_in_heap[self.heap[b]] = Some(b);
    }

    /// Shuffles the index down into the heap, if some child is larger.
    fn heapify_down(&mut self, mut heap_index: usize) {
        loop {
            let left = (2 * heap_index) + 1;
            let right = left + 1;
            let mut update = heap_index;

            if left < self.limit && self.greater(left, update) {
                update = left;
            }
            if right < self.limit && self.greater(right, update) {
                update = right;
            }

            if update == heap_index {
                break;
            }
            self.swap(heap_index, update);
            heap_index = update;
        }
    }

    /// Shuffles the index up from the heap, while the parent is smaller.
    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if !self.greater(heap_index, parent) {
                break;
            }
            self.swap(heap_index, parent);
            heap_index = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(6));
        assert!(test_heap.is_empty());
    }

    #[test]
    fn heap_update() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(6, 10.0), (4, 30.0), (1, 60.0), (0, 70.0)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        test_heap.apply_to_value(6, |v| v + 100.0);
        test_heap.apply_to_value(0, |_| 0.0);
        test_heap.apply_to_all(|v| v * 0.5);
        test_heap.heapify();

        assert_eq!(test_heap.pop_max(), Some(6));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(0));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut test_heap = IndexHeap::default();
        for index in [6, 5, 4, 1, 0] {
            test_heap.add(index, index);
            test_heap.activate(index);
        }

        assert!(test_heap.remove(4));
        assert!(!test_heap.remove(4));
        assert!(test_heap.remove(6));
        assert!(!test_heap.add(4, 10));
        assert!(!test_heap.add(4, 3));
        assert!(test_heap.activate(4));
        assert!(!test_heap.activate(4));

        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(0));
    }
}
