use std::collections::VecDeque;

/// A fixed-capacity ring buffer backed by VecDeque.
/// When full, pushing a new element drops the oldest one.
#[derive(Clone, Debug, PartialEq)]
pub struct RingBuffer<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an element. If at capacity, the oldest element is dropped.
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() >= self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(item);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed element.
    pub fn last(&self) -> Option<&T> {
        self.buf.back()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.buf.get(idx)
    }
}

impl<T: Clone> RingBuffer<T> {
    /// A buffer already holding `capacity` copies of `value`.
    pub fn filled(capacity: usize, value: T) -> Self {
        let mut rb = Self::new(capacity);
        for _ in 0..capacity {
            rb.push(value.clone());
        }
        rb
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.buf.iter().cloned().collect()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
