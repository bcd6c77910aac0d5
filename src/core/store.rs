//! Fixed-capacity object storage for scene registries.
//!
//! A store owns up to `CAP` inline slots, each holding one value of a closed set of
//! concrete types (an `enum_dispatch` enum). Slots are filled once on the building
//! thread and are read-only afterwards, so the render workers can share a store by
//! reference without allocation or indirect calls.

use std::mem::MaybeUninit;

/// Largest footprint a stored value may have: 16 scalar units.
pub const OBJECT_SLOT_SIZE: usize = 16 * std::mem::size_of::<f32>();

pub struct ObjectStore<T: Copy, const CAP: usize> {
    slots: [MaybeUninit<T>; CAP],
    len: usize,
}

pub struct ObjectStoreBuilder<T: Copy, const CAP: usize> {
    slots: [Option<T>; CAP],
    count: usize,
}

impl<T: Copy, const CAP: usize> ObjectStoreBuilder<T, CAP> {
    const FITS_SLOT: () = assert!(
        std::mem::size_of::<T>() <= OBJECT_SLOT_SIZE,
        "stored type is larger than an object slot"
    );

    pub fn new(count: usize) -> anyhow::Result<Self> {
        let _: () = Self::FITS_SLOT;
        if count > CAP {
            anyhow::bail!(format!(
                "object store - {} objects requested but capacity is {}",
                count, CAP
            ));
        }
        Ok(Self {
            slots: [None; CAP],
            count,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Writes `value` into `slot`. Each slot takes exactly one construction.
    pub fn construct<V: Into<T>>(&mut self, slot: usize, value: V) -> anyhow::Result<()> {
        if slot >= self.count {
            anyhow::bail!(format!(
                "object store - slot {} is out of range (count is {})",
                slot, self.count
            ));
        }
        if self.slots[slot].is_some() {
            anyhow::bail!(format!(
                "object store - slot {} is already constructed",
                slot
            ));
        }
        self.slots[slot] = Some(value.into());
        Ok(())
    }

    pub fn build(self) -> anyhow::Result<ObjectStore<T, CAP>> {
        let mut slots = [MaybeUninit::uninit(); CAP];
        for (index, slot) in self.slots[..self.count].iter().enumerate() {
            match slot {
                Some(value) => slots[index] = MaybeUninit::new(*value),
                None => anyhow::bail!(format!(
                    "object store - slot {} was never constructed",
                    index
                )),
            }
        }
        Ok(ObjectStore {
            slots,
            len: self.count,
        })
    }
}

impl<T: Copy, const CAP: usize> ObjectStore<T, CAP> {
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> anyhow::Result<Self> {
        let values: Vec<T> = values.into_iter().collect();
        let mut builder = ObjectStoreBuilder::new(values.len())?;
        for (slot, value) in values.into_iter().enumerate() {
            builder.construct(slot, value)?;
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity() -> usize {
        CAP
    }

    /// Panics if `index` is not a constructed slot.
    pub fn get(&self, index: usize) -> &T {
        let slot = &self.slots[..self.len][index];
        // SAFETY: every slot below `len` was written in `ObjectStoreBuilder::build`
        // and slots are never rewritten afterwards.
        unsafe { slot.assume_init_ref() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |index| self.get(index))
    }
}

impl<T: Copy, const CAP: usize> Clone for ObjectStore<T, CAP> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: Copy, const CAP: usize> Copy for ObjectStore<T, CAP> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Shape {
        Dot(f32),
        Pair(f32, f32),
    }

    #[test]
    fn slots_can_be_constructed_out_of_order() {
        let mut builder = ObjectStoreBuilder::<Shape, 4>::new(3).unwrap();
        builder.construct(2, Shape::Dot(2.0)).unwrap();
        builder.construct(0, Shape::Pair(0.0, 1.0)).unwrap();
        builder.construct(1, Shape::Dot(1.0)).unwrap();
        let store = builder.build().unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(*store.get(0), Shape::Pair(0.0, 1.0));
        assert_eq!(*store.get(2), Shape::Dot(2.0));
        let order: Vec<_> = store.iter().copied().collect();
        assert_eq!(
            order,
            vec![Shape::Pair(0.0, 1.0), Shape::Dot(1.0), Shape::Dot(2.0)]
        );
    }

    #[test]
    fn slot_is_constructed_once() {
        let mut builder = ObjectStoreBuilder::<Shape, 2>::new(2).unwrap();
        builder.construct(0, Shape::Dot(0.0)).unwrap();
        assert!(builder.construct(0, Shape::Dot(1.0)).is_err());
    }

    #[test]
    fn construction_outside_count_is_rejected() {
        let mut builder = ObjectStoreBuilder::<Shape, 4>::new(2).unwrap();
        assert!(builder.construct(2, Shape::Dot(0.0)).is_err());
        assert!(ObjectStoreBuilder::<Shape, 4>::new(5).is_err());
    }

    #[test]
    fn build_requires_every_slot() {
        let mut builder = ObjectStoreBuilder::<Shape, 4>::new(2).unwrap();
        builder.construct(1, Shape::Dot(0.0)).unwrap();
        assert!(builder.build().is_err());
    }

    #[test]
    #[should_panic]
    fn access_past_len_panics() {
        let store = ObjectStore::<Shape, 4>::from_values(vec![Shape::Dot(0.0)]).unwrap();
        store.get(1);
    }

    #[test]
    fn from_values_keeps_order() {
        let store =
            ObjectStore::<Shape, 4>::from_values(vec![Shape::Dot(3.0), Shape::Dot(4.0)]).unwrap();
        assert_eq!(*store.get(1), Shape::Dot(4.0));
        assert_eq!(ObjectStore::<Shape, 4>::capacity(), 4);
        assert!(!store.is_empty());
    }
}
