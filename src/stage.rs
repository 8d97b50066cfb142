//! Stages hold the short-lived objects of a game (bullets, enemies).
//!
//! A [`Stage`] is a doubly-linked list whose nodes live in a slab of slots
//! and point at their siblings by slot index. Appending at the tail and
//! unlinking any node are both O(1). Vacated slots go onto a free list and
//! are reused by later appends; every slot carries a generation that is
//! bumped on removal, so a [`NodeId`] kept past its node's death is
//! rejected instead of silently addressing whatever took its slot.

/// Handle to a node of a [`Stage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

#[derive(Debug, Clone)]
pub struct Stage<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for Stage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head.map(|index| self.id_at(index))
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail.map(|index| self.id_at(index))
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|index| self.value_at(index))
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|index| self.value_at(index))
    }

    /// Appends `value` after the current tail
    pub fn push_back(&mut self, value: T) -> NodeId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        slot.node = Some(Node {
            value,
            prev: self.tail,
            next: None,
        });
        let id = NodeId {
            index,
            generation: slot.generation,
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        id
    }

    /// Unlinks the node behind `id` and hands its value back.
    /// Returns `None` for a handle whose node is already gone.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        match node.prev {
            Some(prev) => {
                if let Some(prev) = self.node_mut(prev) {
                    prev.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(next) = self.node_mut(next) {
                    next.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        self.len -= 1;

        Some(node.value)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref().map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut().map(|node| &mut node.value)
    }

    /// Walks the list from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stage: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Snapshot of the live handles in list order
    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Visits every node from head to tail and unlinks those for which
    /// `keep` returns false.
    pub fn retain_mut<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let slot = &mut self.slots[index];
            let generation = slot.generation;
            let Some(node) = slot.node.as_mut() else {
                break;
            };
            cursor = node.next;
            if !keep(&mut node.value) {
                self.remove(NodeId { index, generation });
            }
        }
    }

    /// Removes every node. Handles issued before the call stay invalid.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Verifies the head/tail pointers, sibling links and length agree
    pub fn check_links(&self) -> Result<(), String> {
        if self.head.is_some() != self.tail.is_some() {
            return Err(format!(
                "head {:?} and tail {:?} disagree",
                self.head, self.tail
            ));
        }

        let mut count = 0;
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if count > self.slots.len() {
                return Err("cycle in next links".to_string());
            }
            let Some(node) = self.slots.get(index).and_then(|slot| slot.node.as_ref()) else {
                return Err(format!("link to vacant slot {index}"));
            };
            if node.prev != prev {
                return Err(format!(
                    "slot {index} has prev {:?}, expected {:?}",
                    node.prev, prev
                ));
            }
            count += 1;
            prev = Some(index);
            cursor = node.next;
        }

        if prev != self.tail {
            return Err(format!("walk ended at {:?}, tail is {:?}", prev, self.tail));
        }
        if count != self.len {
            return Err(format!("reached {count} nodes, len is {}", self.len));
        }
        let occupied = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        if occupied != self.len {
            return Err(format!("{occupied} occupied slots, len is {}", self.len));
        }
        Ok(())
    }

    fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn value_at(&self, index: usize) -> Option<&T> {
        self.slots[index].node.as_ref().map(|node| &node.value)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(index).and_then(|slot| slot.node.as_mut())
    }
}

pub struct Iter<'a, T> {
    stage: &'a Stage<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let stage = self.stage;
        let slot = stage.slots.get(index)?;
        let node = slot.node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((
            NodeId {
                index,
                generation: slot.generation,
            },
            &node.value,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a Stage<T> {
    type Item = (NodeId, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
