use core::fmt;
use std::cmp::Ordering;

/// A min-heap, with a custom comparator.
///
/// Besides the usual push/pop/peek, elements can be invalidated from anywhere in the heap, which
/// the event queue needs to cancel circle events.
pub struct Heap<T, F> {
    data: Vec<T>,
    cmp: F,
}
impl<T, F: Fn(&T, &T) -> Ordering> Heap<T, F> {
    pub fn new(cmp: F) -> Self {
        Heap {
            data: Vec::new(),
            cmp,
        }
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let ret = self.data.swap_remove(0);
        self.sift_down(0);
        Some(ret)
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self, f: impl Fn(&T) -> bool) -> Option<usize> {
        self.data.iter().position(f)
    }

    /// Remove the first element, in storage order, that matches `f`.
    pub fn remove(&mut self, f: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.position(f)?;
        Some(self.remove_at(index))
    }

    pub fn remove_at(&mut self, index: usize) -> T {
        assert!(index < self.data.len());
        let ret = self.data.swap_remove(index);
        // the removed element was the last one, nothing was moved into its slot.
        if index == self.data.len() {
            return ret;
        }
        // the element moved into `index` may belong above or below it.
        let i = self.sift_up(index);
        self.sift_down(i);
        ret
    }

    /// Move the element at `i` up until its parent is not greater. Return its final index.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let p = (i - 1) / 2;
            if (self.cmp)(&self.data[i], &self.data[p]) == Ordering::Less {
                self.data.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
        i
    }

    /// Move the element at `i` down until no child is smaller.
    fn sift_down(&mut self, mut i: usize) {
        while 2 * i + 1 < self.data.len() {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut j = l;
            if r < self.data.len() && (self.cmp)(&self.data[r], &self.data[l]) == Ordering::Less {
                j = r;
            }
            if (self.cmp)(&self.data[j], &self.data[i]) == Ordering::Less {
                self.data.swap(i, j);
                i = j;
            } else {
                break;
            }
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Heap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heap() {
        let mut heap = Heap::new(|a: &i32, b: &i32| a.cmp(b));
        assert_eq!(heap.pop(), None);
        heap.push(3);
        heap.push(2);
        heap.push(1);
        heap.push(4);
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), Some(4));
        assert_eq!(heap.pop(), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn remove_last_slot() {
        let mut heap = Heap::new(|a: &i32, b: &i32| a.cmp(b));
        heap.push(1);
        heap.push(2);
        let last = *heap.as_slice().last().unwrap();

        assert_eq!(heap.remove(|&x| x == last), Some(last));
        assert_eq!(heap.len(), 1);

        assert_eq!(heap.remove(|&x| x == 1), Some(1));
        assert!(heap.is_empty());
        assert_eq!(heap.remove(|&x| x == 1), None);
    }

    #[test]
    fn remove_moves_element_up() {
        // removing a leaf of the left subtree may pull a smaller leaf from the right subtree into
        // its place, which must then move up.
        let mut heap = Heap::new(|a: &i32, b: &i32| a.cmp(b));
        for x in [0, 10, 1, 11, 12, 2, 3] {
            heap.push(x);
        }
        assert_eq!(heap.as_slice(), &[0, 10, 1, 11, 12, 2, 3]);

        heap.remove(|&x| x == 11);

        let mut order = vec![];
        while let Some(x) = heap.pop() {
            order.push(x);
        }
        assert_eq!(order, vec![0, 1, 2, 3, 10, 12]);
    }

    proptest! {
        #[test]
        fn always_sort(mut items: Vec<u32>) {
            let mut heap = Heap::new(u32::cmp);

            for item in items.iter().copied() {
                heap.push(item);
            }

            let mut heap_order = vec![];
            while let Some(item) = heap.pop() {
                heap_order.push(item);
            }

            items.sort();

            assert_eq!(items, heap_order);
        }

        #[test]
        fn sort_after_removes(items: Vec<u16>, removed: Vec<u16>) {
            let mut heap = Heap::new(u16::cmp);
            let mut expected = items.clone();

            for item in items.iter().copied() {
                heap.push(item);
            }

            for r in removed {
                let in_heap = heap.remove(|&x| x == r);
                let pos = expected.iter().position(|&x| x == r);
                assert_eq!(in_heap.is_some(), pos.is_some());
                if let Some(pos) = pos {
                    expected.swap_remove(pos);
                }
            }

            let mut heap_order = vec![];
            while let Some(item) = heap.pop() {
                heap_order.push(item);
            }

            expected.sort();

            assert_eq!(expected, heap_order);
        }
    }
}
