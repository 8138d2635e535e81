//! Kind-tagged handle tables for arrays and iterators owned on the Rust side.
//!
//! A handle packs three fields into a `u64`:
//!
//! ```text
//!  63      56 55            32 31                0
//! ┌──────────┬────────────────┬──────────────────┐
//! │   kind   │      slot      │    generation    │
//! └──────────┴────────────────┴──────────────────┘
//! ```
//!
//! The kind byte is never zero, so a zero-initialised C handle never
//! resolves, and an iterator handle passed where an array is expected is
//! rejected. Destroying an object bumps its slot's generation, which makes
//! old handles stale.

/// Which table a handle belongs to. Stored in the top byte of every handle.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HandleKind {
    Array = 0xDA,
    Iterator = 0x17,
}

const SLOT_BITS: u32 = 24;
const SLOT_MASK: u64 = (1 << SLOT_BITS) - 1;

/// Most objects one table can hold at once.
pub(crate) const MAX_SLOTS: u32 = 1 << SLOT_BITS;

enum Entry<T> {
    Live { generation: u32, value: T },
    /// Reusable. `next` links the free chain.
    Free { generation: u32, next: Option<u32> },
    /// Generation exhausted; never handed out again.
    Retired,
}

/// Owns values of one kind and hands out handles for them.
pub(crate) struct HandleTable<T> {
    kind: HandleKind,
    entries: Vec<Entry<T>>,
    free_head: Option<u32>,
    slot_limit: u32,
}

impl<T> HandleTable<T> {
    /// An empty table. `const` so it can back a `static`.
    pub const fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            free_head: None,
            slot_limit: MAX_SLOTS,
        }
    }

    fn pack(&self, slot: u32, generation: u32) -> u64 {
        (u64::from(self.kind as u8) << 56) | (u64::from(slot) << 32) | u64::from(generation)
    }

    /// Split `handle` into slot and generation, or `None` if it is of
    /// another kind.
    fn unpack(&self, handle: u64) -> Option<(usize, u32)> {
        if (handle >> 56) as u8 != self.kind as u8 {
            return None;
        }
        Some((((handle >> 32) & SLOT_MASK) as usize, handle as u32))
    }

    /// Take ownership of `value` and return its handle.
    ///
    /// Returns `None` when every slot is live or retired.
    pub fn insert(&mut self, value: T) -> Option<u64> {
        let (slot, generation) = match self.free_head {
            Some(slot) => {
                let Entry::Free { generation, next } = self.entries[slot as usize] else {
                    return None;
                };
                self.free_head = next;
                (slot, generation)
            }
            None => {
                let slot = u32::try_from(self.entries.len())
                    .ok()
                    .filter(|&s| s < self.slot_limit)?;
                self.entries.push(Entry::Retired);
                (slot, 0)
            }
        };
        self.entries[slot as usize] = Entry::Live { generation, value };
        Some(self.pack(slot, generation))
    }

    /// The value behind `handle`, or `None` if the handle is stale, unknown
    /// or of another kind.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let (slot, expected) = self.unpack(handle)?;
        match self.entries.get(slot)? {
            Entry::Live { generation, value } if *generation == expected => Some(value),
            _ => None,
        }
    }

    /// Mutable access to the value behind `handle`.
    pub fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        let (slot, expected) = self.unpack(handle)?;
        match self.entries.get_mut(slot)? {
            Entry::Live { generation, value } if *generation == expected => Some(value),
            _ => None,
        }
    }

    /// Remove and return the value behind `handle`.
    ///
    /// The slot goes back on the free chain under the next generation, or is
    /// retired once its generation is exhausted.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, expected) = self.unpack(handle)?;
        let entry = self.entries.get_mut(slot)?;
        if !matches!(entry, Entry::Live { generation, .. } if *generation == expected) {
            return None;
        }
        let vacated = match expected.checked_add(1) {
            Some(generation) => {
                let next = self.free_head.replace(slot as u32);
                Entry::Free { generation, next }
            }
            None => Entry::Retired,
        };
        match std::mem::replace(entry, vacated) {
            Entry::Live { value, .. } => Some(value),
            _ => None,
        }
    }
}
