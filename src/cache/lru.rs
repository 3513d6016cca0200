//! Recency List Module
//!
//! Doubly-linked recency order used for LRU eviction.

use crate::cache::Entry;

// == Node Handle ==
/// Position of an entry inside a [`RecencyList`].
///
/// A handle stays valid until its node is removed; slots are recycled after
/// that, so a stale handle must not be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    entry: Entry,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Entries ordered by access time.
///
/// Nodes live in a `Vec` arena and link to each other by index:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Every operation is O(1).
#[derive(Debug, Default)]
pub struct RecencyList {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used.
    pub fn push_front(&mut self, entry: Entry) -> NodeId {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            self.node_mut(old_head).prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks a node as the most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id.0) || !self.is_live(id) {
            return;
        }
        self.unlink(id.0);

        let old_head = self.head;
        {
            let node = self.node_mut(id.0);
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            self.node_mut(old_head).prev = Some(id.0);
        }
        self.head = Some(id.0);
        if self.tail.is_none() {
            self.tail = Some(id.0);
        }
    }

    // == Remove ==
    /// Unlinks a node and returns its entry.
    pub fn remove(&mut self, id: NodeId) -> Option<Entry> {
        if !self.is_live(id) {
            return None;
        }
        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<Entry> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    // == Replace ==
    /// Swaps the entry held by a node, keeping its position.
    ///
    /// Returns the previous entry, or None if the handle is stale.
    pub fn replace(&mut self, id: NodeId, entry: Entry) -> Option<Entry> {
        let node = self.slots.get_mut(id.0)?.as_mut()?;
        Some(std::mem::replace(&mut node.entry, entry))
    }

    /// Returns the entry held by a node.
    pub fn get(&self, id: NodeId) -> Option<&Entry> {
        self.slots.get(id.0)?.as_ref().map(|node| &node.entry)
    }

    /// Most recently used entry.
    pub fn front(&self) -> Option<&Entry> {
        self.head.and_then(|idx| self.get(NodeId(idx)))
    }

    /// Least recently used entry.
    pub fn back(&self) -> Option<&Entry> {
        self.tail.and_then(|idx| self.get(NodeId(idx)))
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn is_live(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    // Callers guarantee `idx` names a live slot.
    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match self.slots[idx].as_mut() {
            Some(node) => node,
            None => unreachable!("recency list link points at a free slot"),
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev.take(), node.next.take())
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
}

// == Iterator ==
/// Iterator over a [`RecencyList`], front to back.
pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.slots.get(idx)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList) -> Vec<String> {
        list.iter().map(|e| e.key().to_string()).collect()
    }

    fn push(list: &mut RecencyList, key: &str) -> NodeId {
        list.push_front(Entry::new(key, format!("value_{}", key)))
    }

    #[test]
    fn test_list_new() {
        let list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.front().is_none());
        assert!(list.back().is_none());
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        push(&mut list, "key1");
        push(&mut list, "key2");
        push(&mut list, "key3");

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.back().map(Entry::key), Some("key1"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        push(&mut list, "c");

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back().map(Entry::key), Some("b"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_middle_and_head() {
        let mut list = RecencyList::new();

        push(&mut list, "a");
        let b = push(&mut list, "b");
        let c = push(&mut list, "c");

        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        // Already at front: no change
        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        list.move_to_front(c);
        assert_eq!(keys(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_pop_back_evicts_oldest() {
        let mut list = RecencyList::new();

        push(&mut list, "key1");
        push(&mut list, "key2");
        push(&mut list, "key3");

        assert_eq!(list.pop_back().map(|e| e.key().to_string()), Some("key1".into()));
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back().map(|e| e.key().to_string()), Some("key2".into()));
        assert_eq!(list.pop_back().map(|e| e.key().to_string()), Some("key3".into()));
        assert!(list.is_empty());
        assert!(list.pop_back().is_none());
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();

        push(&mut list, "key1");
        let key2 = push(&mut list, "key2");
        push(&mut list, "key3");

        let removed = list.remove(key2).unwrap();
        assert_eq!(removed.key(), "key2");
        assert_eq!(keys(&list), vec!["key3", "key1"]);

        // Stale handle is ignored
        assert!(list.remove(key2).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = RecencyList::with_capacity(2);

        let a = push(&mut list, "a");
        push(&mut list, "b");
        list.remove(a);
        let c = push(&mut list, "c");

        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
        assert_eq!(list.get(c).map(Entry::value), Some("value_c"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");

        let old = list.replace(a, Entry::new("a", "fresh")).unwrap();
        assert_eq!(old.value(), "value_a");
        assert_eq!(list.get(a).map(Entry::value), Some("fresh"));
        assert_eq!(keys(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_single_node_list() {
        let mut list = RecencyList::new();

        let only = push(&mut list, "only");
        list.move_to_front(only);
        assert_eq!(list.front(), list.back());

        list.remove(only);
        assert!(list.front().is_none());
        assert!(list.back().is_none());

        push(&mut list, "next");
        assert_eq!(keys(&list), vec!["next"]);
    }
}
