// Payload allocation for growable containers: capacity header + inline storage.
use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

/// Heap block behind every growable container: a capacity header followed by
/// `capacity` inline elements, the C flexible-array-member shape. Headers
/// (`RawSeq`) point at one of these; the block is only ever reached through
/// that pointer so the header's own address stays stable across mutation.
#[repr(C)]
pub struct Payload<T> {
    pub capacity: isize,
    elems: [T; 0],
}

impl<T> Payload<T> {
    fn layout(capacity: usize) -> Layout {
        let elems = Layout::array::<T>(capacity).unwrap_or_else(|_| capacity_overflow());
        let (layout, _) = Layout::new::<Self>()
            .extend(elems)
            .unwrap_or_else(|_| capacity_overflow());
        layout.pad_to_align()
    }

    /// Allocates a block for `capacity` elements and records the capacity in
    /// its header. Exhaustion is fatal; there is no recovery channel anywhere
    /// in this layer.
    pub fn alloc(capacity: usize) -> NonNull<Self> {
        let layout = Self::layout(capacity);
        let raw = unsafe { alloc::alloc(layout) }.cast::<Self>();
        let Some(payload) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };
        unsafe { (*payload.as_ptr()).capacity = capacity as isize };
        payload
    }

    /// Allocates a block of `capacity` elements and copies `source` into the
    /// front of it. `capacity` must be at least `source.len()`; the spare tail
    /// is left unspecified, not zeroed.
    pub fn alloc_copy(source: &[T], capacity: usize) -> NonNull<Self>
    where
        T: Copy,
    {
        debug_assert!(capacity >= source.len());
        let payload = Self::alloc(capacity);
        unsafe {
            ptr::copy_nonoverlapping(
                source.as_ptr(),
                Self::elems_ptr(payload.as_ptr()),
                source.len(),
            );
        }
        payload
    }

    /// Releases a block previously produced by `alloc`/`alloc_copy`. The
    /// original `Layout` is rebuilt from the stored capacity, so the header
    /// must not have been tampered with.
    ///
    /// # Safety
    /// `payload` must come from `alloc`/`alloc_copy` and must not be used
    /// again afterwards.
    pub unsafe fn dealloc(payload: *mut Self) {
        let capacity = unsafe { (*payload).capacity } as usize;
        let layout = Self::layout(capacity);
        unsafe { alloc::dealloc(payload.cast::<u8>(), layout) };
    }

    /// First-element pointer of a block.
    ///
    /// # Safety
    /// `payload` must point at a live block.
    pub unsafe fn elems_ptr(payload: *mut Self) -> *mut T {
        unsafe { (&raw mut (*payload).elems).cast::<T>() }
    }
}

fn capacity_overflow() -> ! {
    panic!("container capacity overflows the address space");
}

#[cfg(test)]
mod tests {
    use super::Payload;

    #[test]
    fn alloc_records_capacity() {
        let payload = Payload::<f64>::alloc(7);
        unsafe {
            assert_eq!((*payload.as_ptr()).capacity, 7);
            Payload::dealloc(payload.as_ptr());
        }
    }

    #[test]
    fn alloc_copy_preserves_order() {
        let source = [3i64, 1, 4, 1, 5];
        let payload = Payload::alloc_copy(&source, source.len());
        unsafe {
            let elems = Payload::elems_ptr(payload.as_ptr());
            for (i, expected) in source.iter().enumerate() {
                assert_eq!(*elems.add(i), *expected);
            }
            Payload::dealloc(payload.as_ptr());
        }
    }
}
