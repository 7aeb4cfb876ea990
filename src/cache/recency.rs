//! Recency List Module
//!
//! Access-order tracking for LRU eviction, stored as a doubly linked list
//! inside an arena so nodes are addressed by stable indices, not pointers.

// == Handle ==
/// Stable position of a key inside a [`RecencyList`].
///
/// Valid until that key is removed or evicted; slots are reused afterwards.
pub type Handle = usize;

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<Handle>,
    next: Option<Handle>,
}

// == Recency List ==
/// Keys ordered from most recently used (head) to least recently used (tail).
///
/// Every operation is O(1). The owner keeps each key's [`Handle`] next to
/// its value so "move to front" never has to search.
#[derive(Debug)]
pub struct RecencyList<K> {
    /// Node slots; `None` marks a free slot
    slots: Vec<Option<Node<K>>>,
    /// Free slot indices available for reuse
    free: Vec<Handle>,
    /// Most recently used
    head: Option<Handle>,
    /// Least recently used
    tail: Option<Handle>,
    len: usize,
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates an empty recency list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Adds a key as the most recently used and returns its handle.
    pub fn push_front(&mut self, key: K) -> Handle {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(node);
                handle
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks the key at `handle` as most recently used.
    ///
    /// # Panics
    /// If `handle` does not refer to a live entry.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);

        let old_head = self.head;
        {
            let node = self.node_mut(handle);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.node_mut(old_head).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    // == Remove ==
    /// Removes the key at `handle` and returns it.
    ///
    /// # Panics
    /// If `handle` does not refer to a live entry.
    pub fn remove(&mut self, handle: Handle) -> K {
        self.unlink(handle);
        let node = self.slots[handle]
            .take()
            .expect("recency handle refers to a live node");
        self.free.push(handle);
        self.len -= 1;
        node.key
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<K> {
        let tail = self.tail?;
        Some(self.remove(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub fn peek_back(&self) -> Option<&K> {
        self.tail.map(|tail| &self.node(tail).key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iterate ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.node(cursor?);
            cursor = node.next;
            Some(&node.key)
        })
    }

    /// Detaches a node from its neighbours, leaving its own links stale.
    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let node = self.node(handle);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn node(&self, handle: Handle) -> &Node<K> {
        self.slots[handle]
            .as_ref()
            .expect("recency handle refers to a live node")
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.slots[handle]
            .as_mut()
            .expect("recency handle refers to a live node")
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_recency_new() {
        let list: RecencyList<String> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.peek_back(), None);
    }

    #[test]
    fn test_recency_push_front() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(list.peek_back(), Some(&"key1"));
        assert_eq!(order(&list), vec!["key3", "key2", "key1"]);
    }

    #[test]
    fn test_recency_move_to_front() {
        let mut list = RecencyList::new();

        let h1 = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        list.move_to_front(h1);

        assert_eq!(list.len(), 3);
        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_back(), Some(&"b"));
    }

    #[test]
    fn test_recency_move_tail_and_head() {
        let mut list = RecencyList::new();

        let ha = list.push_front("a");
        let hb = list.push_front("b");

        // Moving the head is a no-op
        list.move_to_front(hb);
        assert_eq!(order(&list), vec!["b", "a"]);

        // Moving the tail swaps the pair
        list.move_to_front(ha);
        assert_eq!(order(&list), vec!["a", "b"]);
        assert_eq!(list.peek_back(), Some(&"b"));
    }

    #[test]
    fn test_recency_pop_back() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.pop_back(), Some("key1"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back(), Some("key2"));
        assert_eq!(list.pop_back(), Some("key3"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_recency_remove_middle() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        let h2 = list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.remove(h2), "key2");
        assert_eq!(list.len(), 2);
        assert_eq!(order(&list), vec!["key3", "key1"]);
    }

    #[test]
    fn test_recency_remove_only_node() {
        let mut list = RecencyList::new();
        let h = list.push_front("solo");

        assert_eq!(list.remove(h), "solo");
        assert!(list.is_empty());
        assert_eq!(list.peek_back(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_recency_reuses_free_slots() {
        let mut list = RecencyList::with_capacity(2);

        list.push_front("a");
        list.push_front("b");
        list.pop_back();
        list.push_front("c");

        // "c" took over the slot freed by "a"
        assert_eq!(list.slots.len(), 2);
        assert_eq!(order(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_recency_order_after_multiple_touches() {
        let mut list = RecencyList::new();

        let ha = list.push_front("a");
        let hb = list.push_front("b");
        let hc = list.push_front("c");

        // [c, b, a] -> touch a -> [a, c, b] -> touch c -> [c, a, b] -> touch b -> [b, c, a]
        list.move_to_front(ha);
        list.move_to_front(hc);
        list.move_to_front(hb);

        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("c"));
        assert_eq!(list.pop_back(), Some("b"));
    }

    #[test]
    #[should_panic(expected = "live node")]
    fn test_recency_move_stale_handle_panics() {
        let mut list = RecencyList::new();
        let h = list.push_front("gone");
        list.push_front("kept");
        list.remove(h);

        list.move_to_front(h);
    }
}
