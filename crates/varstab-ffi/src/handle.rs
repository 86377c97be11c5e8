//! Slot+generation table behind the engine handles given to C callers.
//!
//! A handle packs a slot index (upper 32 bits) and the slot's generation
//! (lower 32 bits). Removing a value bumps the slot's generation, so a
//! destroyed engine's handle resolves to `None` instead of reaching
//! whatever the slot holds next. Generations start at 1, which keeps the
//! all-zero handle of a zero-initialised C variable permanently invalid.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Key {
    slot: u32,
    generation: u32,
}

impl Key {
    fn pack(self) -> u64 {
        (u64::from(self.slot) << 32) | u64::from(self.generation)
    }

    fn unpack(handle: u64) -> Self {
        Self {
            slot: (handle >> 32) as u32,
            generation: handle as u32,
        }
    }
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { next_generation: u32 },
    /// Generation space exhausted; never reused.
    Retired,
}

/// Maps `u64` handles to owned values, reusing vacated slots.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    vacant: Vec<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            live: 0,
        }
    }

    /// Store `value` and return its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        self.live += 1;
        while let Some(slot) = self.vacant.pop() {
            let entry = &mut self.slots[slot as usize];
            if let Slot::Vacant { next_generation } = *entry {
                *entry = Slot::Occupied {
                    generation: next_generation,
                    value,
                };
                return Key {
                    slot,
                    generation: next_generation,
                }
                .pack();
            }
        }
        let slot = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 1,
            value,
        });
        Key {
            slot,
            generation: 1,
        }
        .pack()
    }

    /// The value behind `handle`, if it is live.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let key = Key::unpack(handle);
        match self.slots.get(key.slot as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    /// Take the value behind `handle` out of the table.
    ///
    /// `None` for a stale, unknown or already-removed handle.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let key = Key::unpack(handle);
        let entry = self.slots.get_mut(key.slot as usize)?;
        match entry {
            Slot::Occupied { generation, .. } if *generation == key.generation => {}
            _ => return None,
        }
        let replacement = match key.generation.checked_add(1) {
            Some(next_generation) => {
                self.vacant.push(key.slot);
                Slot::Vacant { next_generation }
            }
            None => Slot::Retired,
        };
        self.live -= 1;
        match std::mem::replace(entry, replacement) {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Number of live values.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.live
    }
}
