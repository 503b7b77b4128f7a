//! Array-backed sequence containers.
//!
//! This module defines three containers that share one growth policy:
//! - `Stack`: LIFO over a contiguous array.
//! - `Queue`: FIFO over a ring buffer.
//! - `Deque`: double-ended ring buffer with indexed reads.
//!
//! Every container starts with a fixed capacity and doubles it when an insert
//! finds it full. Capacity never shrinks. Growth moves the logical contents
//! into a fresh array starting at index 0, so ring buffers come out of a
//! resize with `front == 0` regardless of where the ring had wrapped.
use crate::error::ContainerError;

/// Capacity used by `new()` and `Default` for every container.
pub const DEFAULT_CAPACITY: usize = 10;

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Moves the `size` logical elements of a ring that starts at `front` into a
/// new array of `new_capacity` slots, in logical order from index 0.
fn relinearize<T>(
    data: &mut [Option<T>],
    front: usize,
    size: usize,
    new_capacity: usize,
) -> Box<[Option<T>]> {
    let capacity = data.len();
    let mut grown = empty_slots(new_capacity);
    for (i, slot) in grown.iter_mut().take(size).enumerate() {
        *slot = data[(front + i) % capacity].take();
    }
    grown
}

/// A LIFO stack that doubles its capacity when full.
///
/// # Examples
/// ```
/// use chain_reaction::containers::Stack;
/// let mut stack = Stack::with_capacity(1);
/// stack.push('a');
/// stack.push('b');
/// assert_eq!(stack.capacity(), 2);
/// assert_eq!(stack.pop(), Ok('b'));
/// assert_eq!(stack.peek(), Some(&'a'));
/// ```
#[derive(Clone, Debug)]
pub struct Stack<T> {
    data: Box<[Option<T>]>,
    size: usize,
}

impl<T> Stack<T> {
    /// Creates an empty stack with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty stack with room for `capacity` values.
    /// A requested capacity of zero is raised to one so doubling can make progress.
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            data: empty_slots(capacity.max(1)),
            size: 0,
        }
    }

    /// Number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of values currently stored.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Pushes `value` on top, doubling the capacity first if the stack is full.
    pub fn push(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        self.data[self.size] = Some(value);
        self.size += 1;
    }

    /// Removes and returns the most recently pushed value.
    ///
    /// # Errors
    /// Returns `ContainerError::EmptyContainer` if the stack is empty.
    pub fn pop(&mut self) -> Result<T, ContainerError> {
        let empty = ContainerError::EmptyContainer { op: "pop" };
        if self.size == 0 {
            return Err(empty);
        }
        self.size -= 1;
        self.data[self.size].take().ok_or(empty)
    }

    /// Returns the top value without removing it, or `None` if the stack is empty.
    pub fn peek(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.data[self.size - 1].as_ref()
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        self.data = relinearize(&mut self.data, 0, self.size, new_capacity);
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A FIFO queue stored in a ring buffer.
///
/// The back of the queue is always `(front + size - 1) mod capacity`, so only
/// `front` and `size` are stored.
#[derive(Clone, Debug)]
pub struct Queue<T> {
    data: Box<[Option<T>]>,
    front: usize,
    size: usize,
}

impl<T> Queue<T> {
    /// Creates an empty queue with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty queue with room for `capacity` values (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Queue {
            data: empty_slots(capacity.max(1)),
            front: 0,
            size: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Appends `value` at the back, growing first if the ring is full.
    pub fn enqueue(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        let back = (self.front + self.size) % self.capacity();
        self.data[back] = Some(value);
        self.size += 1;
    }

    /// Removes and returns the value at the front.
    ///
    /// # Errors
    /// Returns `ContainerError::EmptyContainer` if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, ContainerError> {
        let empty = ContainerError::EmptyContainer { op: "dequeue" };
        if self.size == 0 {
            return Err(empty);
        }
        let value = self.data[self.front].take().ok_or(empty)?;
        self.front = (self.front + 1) % self.capacity();
        self.size -= 1;
        Ok(value)
    }

    /// Returns the front value, or `None` if the queue is empty.
    pub fn peek_front(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.data[self.front].as_ref()
    }

    /// Iterates from front to back without consuming the queue.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.size).filter_map(move |i| self.data[(self.front + i) % capacity].as_ref())
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        self.data = relinearize(&mut self.data, self.front, self.size, new_capacity);
        self.front = 0;
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A double-ended queue stored in a ring buffer.
///
/// Logical index 0 is the front; `at(k)` reads physical slot
/// `(front + k) mod capacity`.
#[derive(Clone, Debug)]
pub struct Deque<T> {
    data: Box<[Option<T>]>,
    front: usize,
    size: usize,
}

impl<T> Deque<T> {
    /// Creates an empty deque with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty deque with room for `capacity` values (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Deque {
            data: empty_slots(capacity.max(1)),
            front: 0,
            size: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn push_front(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        self.front = (self.front + self.capacity() - 1) % self.capacity();
        self.data[self.front] = Some(value);
        self.size += 1;
    }

    pub fn push_back(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        let back = (self.front + self.size) % self.capacity();
        self.data[back] = Some(value);
        self.size += 1;
    }

    /// Removes and returns the front value.
    ///
    /// # Errors
    /// Returns `ContainerError::EmptyContainer` if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T, ContainerError> {
        let empty = ContainerError::EmptyContainer { op: "pop_front" };
        if self.size == 0 {
            return Err(empty);
        }
        let value = self.data[self.front].take().ok_or(empty)?;
        self.front = (self.front + 1) % self.capacity();
        self.size -= 1;
        Ok(value)
    }

    /// Removes and returns the back value.
    ///
    /// # Errors
    /// Returns `ContainerError::EmptyContainer` if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T, ContainerError> {
        let empty = ContainerError::EmptyContainer { op: "pop_back" };
        if self.size == 0 {
            return Err(empty);
        }
        let back = (self.front + self.size - 1) % self.capacity();
        let value = self.data[back].take().ok_or(empty)?;
        self.size -= 1;
        Ok(value)
    }

    pub fn peek_front(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.data[self.front].as_ref()
    }

    pub fn peek_back(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.data[(self.front + self.size - 1) % self.capacity()].as_ref()
    }

    /// Returns the value at logical index `k`, counting from the front.
    ///
    /// # Errors
    /// Returns `ContainerError::IndexOutOfRange` unless `k < size()`.
    pub fn at(&self, k: usize) -> Result<&T, ContainerError> {
        let out_of_range = ContainerError::IndexOutOfRange {
            index: k,
            size: self.size,
        };
        if k >= self.size {
            return Err(out_of_range);
        }
        self.data[(self.front + k) % self.capacity()]
            .as_ref()
            .ok_or(out_of_range)
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        self.data = relinearize(&mut self.data, self.front, self.size, new_capacity);
        self.front = 0;
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_pops_in_reverse_push_order() {
        let mut stack = Stack::new();
        for i in 0..5 {
            stack.push(i);
        }
        let popped: Vec<i32> = (0..5).map(|_| stack.pop().unwrap()).collect();
        assert_eq!(popped, vec![4, 3, 2, 1, 0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_growth_preserves_lifo() {
        let mut stack = Stack::with_capacity(2);
        for i in 0..7 {
            stack.push(i);
        }
        assert_eq!(stack.capacity(), 8, "2 -> 4 -> 8 after seven pushes");
        assert_eq!(stack.size(), 7);

        // Interleave pops and pushes across the old capacity boundary.
        assert_eq!(stack.pop(), Ok(6));
        assert_eq!(stack.pop(), Ok(5));
        stack.push(50);
        assert_eq!(stack.peek(), Some(&50));
        assert_eq!(stack.pop(), Ok(50));
        for expected in (0..5).rev() {
            assert_eq!(stack.pop(), Ok(expected));
        }
        assert_eq!(stack.capacity(), 8, "capacity never shrinks");
    }

    #[test]
    fn test_stack_pop_empty_fails() {
        let mut stack: Stack<u8> = Stack::default();
        assert_eq!(stack.peek(), None);
        assert_eq!(
            stack.pop(),
            Err(ContainerError::EmptyContainer { op: "pop" })
        );
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut stack = Stack::with_capacity(0);
        assert_eq!(stack.capacity(), 1);
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.capacity(), 2);
    }

    #[test]
    fn test_queue_fifo_order() {
        let mut queue = Queue::new();
        queue.enqueue("a");
        queue.enqueue("b");
        queue.enqueue("c");
        assert_eq!(queue.peek_front(), Some(&"a"));
        assert_eq!(queue.dequeue(), Ok("a"));
        assert_eq!(queue.dequeue(), Ok("b"));
        assert_eq!(queue.dequeue(), Ok("c"));
        assert_eq!(
            queue.dequeue(),
            Err(ContainerError::EmptyContainer { op: "dequeue" })
        );
        assert_eq!(queue.peek_front(), None);
    }

    #[test]
    fn test_queue_resize_with_wrapped_ring() {
        let mut queue = Queue::with_capacity(4);
        for i in 0..4 {
            queue.enqueue(i);
        }
        // Advance front so the ring wraps: physical layout [4, 5, 2, 3].
        assert_eq!(queue.dequeue(), Ok(0));
        assert_eq!(queue.dequeue(), Ok(1));
        queue.enqueue(4);
        queue.enqueue(5);
        assert_eq!(queue.capacity(), 4);

        // Full and wrapped: this enqueue must re-linearize from front.
        queue.enqueue(6);
        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.front, 0, "growth resets the ring origin");
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);

        let drained: Vec<i32> = (0..5).map(|_| queue.dequeue().unwrap()).collect();
        assert_eq!(drained, vec![2, 3, 4, 5, 6]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_many_resizes_keep_fifo() {
        let mut queue = Queue::with_capacity(1);
        let mut expected = std::collections::VecDeque::new();
        for i in 0..100 {
            queue.enqueue(i);
            expected.push_back(i);
            if i % 3 == 0 {
                assert_eq!(queue.dequeue().ok(), expected.pop_front());
            }
        }
        while let Some(want) = expected.pop_front() {
            assert_eq!(queue.dequeue(), Ok(want));
        }
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_deque_alternating_pushes_index_front_to_back() {
        let mut deque = Deque::with_capacity(2);
        let mut model = std::collections::VecDeque::new();
        for i in 0..9 {
            if i % 2 == 0 {
                deque.push_front(i);
                model.push_front(i);
            } else {
                deque.push_back(i);
                model.push_back(i);
            }
        }
        assert_eq!(deque.size(), 9);
        assert_eq!(deque.capacity(), 16);
        for (k, want) in model.iter().enumerate() {
            assert_eq!(deque.at(k), Ok(want), "mismatch at logical index {}", k);
        }
    }

    #[test]
    fn test_deque_at_out_of_range() {
        let mut deque = Deque::new();
        deque.push_back(1);
        assert_eq!(
            deque.at(1),
            Err(ContainerError::IndexOutOfRange { index: 1, size: 1 })
        );
    }

    #[test]
    fn test_deque_pops_both_ends() {
        let mut deque = Deque::with_capacity(3);
        deque.push_back(2);
        deque.push_front(1);
        deque.push_back(3);
        deque.push_front(0);
        assert_eq!(deque.peek_front(), Some(&0));
        assert_eq!(deque.peek_back(), Some(&3));
        assert_eq!(deque.pop_back(), Ok(3));
        assert_eq!(deque.pop_front(), Ok(0));
        assert_eq!(deque.pop_back(), Ok(2));
        assert_eq!(deque.pop_back(), Ok(1));
        assert_eq!(
            deque.pop_front(),
            Err(ContainerError::EmptyContainer { op: "pop_front" })
        );
        assert_eq!(
            deque.pop_back(),
            Err(ContainerError::EmptyContainer { op: "pop_back" })
        );
    }
}
