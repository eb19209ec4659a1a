// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Bump allocation from a fixed arena.

An arena hands out memory by advancing a cursor. Nothing is ever given back:
[`BumpArena::release`] exists so code written against a malloc/free pair
keeps working, but it does nothing, and addresses only ever increase. This
fits programs that allocate a bounded number of objects at startup and keep
them for the rest of the run.

 - [`BumpArena`] owns the storage and the cursor.
 - [`GlobalArena`] shares one arena process-wide and implements
   [`GlobalAlloc`].
*/

use core::alloc::{GlobalAlloc, Layout};
use core::cell::{Cell, UnsafeCell};
use core::ptr::{self, NonNull};

use log::debug;
use ufmt::derive::uDebug;

/// Size of the process-wide heap.
pub const HEAP_SIZE: usize = 4096;

/// Alignment of every allocation and granularity of the cursor.
pub const ARENA_ALIGN: usize = 4;

/// The arena does not have room for the request.
#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaExhausted {
    /// Bytes the request needed after rounding and padding.
    pub requested: usize,
    /// Bytes left in the arena.
    pub remaining: usize,
}

#[repr(C, align(4))]
struct Storage<const N: usize>([u8; N]);

/// A fixed-capacity arena of `N` bytes with a single bump cursor.
///
/// Invariant: `0 <= cursor <= N`, and `cursor` is a multiple of
/// [`ARENA_ALIGN`].
pub struct BumpArena<const N: usize> {
    storage: UnsafeCell<Storage<N>>,
    cursor: Cell<usize>,
}

impl<const N: usize> BumpArena<N> {
    pub const fn new() -> BumpArena<N> {
        BumpArena {
            storage: UnsafeCell::new(Storage([0; N])),
            cursor: Cell::new(0),
        }
    }

    /// Total size of the arena in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes handed out so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        N - self.cursor.get()
    }

    /// Allocate `size` bytes, rounded up to a multiple of four.
    ///
    /// The returned address is 4-byte aligned and the memory stays valid for
    /// the lifetime of the arena. On failure the cursor is left untouched,
    /// so a smaller request may still succeed afterwards.
    pub fn allocate(&self, size: usize) -> Result<NonNull<u8>, ArenaExhausted> {
        let aligned = align_up(size, ARENA_ALIGN).ok_or(ArenaExhausted {
            requested: size,
            remaining: self.remaining(),
        })?;
        self.bump(0, aligned)
    }

    /// Allocate memory for `layout`.
    ///
    /// Like [`BumpArena::allocate`], but first pads the cursor up to the
    /// alignment `layout` asks for when that is stricter than four bytes.
    pub fn allocate_layout(&self, layout: Layout) -> Result<NonNull<u8>, ArenaExhausted> {
        let align = layout.align().max(ARENA_ALIGN);
        let cursor = self.cursor.get();
        let exhausted = ArenaExhausted {
            requested: layout.size(),
            remaining: self.remaining(),
        };

        let start = self.base_addr().checked_add(cursor).ok_or(exhausted)?;
        let padding = align_up(start, align).ok_or(exhausted)? - start;
        let aligned = align_up(layout.size(), ARENA_ALIGN).ok_or(exhausted)?;
        self.bump(padding, aligned)
    }

    /// Give memory back to the arena. This is a no-op: a bump arena never
    /// reuses addresses.
    pub fn release(&self, _ptr: *mut u8) {}

    fn bump(&self, padding: usize, size: usize) -> Result<NonNull<u8>, ArenaExhausted> {
        let cursor = self.cursor.get();
        let total = padding.checked_add(size);
        let end = total.and_then(|total| cursor.checked_add(total));

        match end {
            Some(end) if end <= N => {
                let start = cursor + padding;
                self.cursor.set(end);
                // SAFETY: `start <= end <= N`, so the pointer stays within (or
                // one past the end of) the storage.
                let ptr = unsafe { self.storage.get().cast::<u8>().add(start) };
                // SAFETY: derived from a non-null `UnsafeCell` pointer.
                Ok(unsafe { NonNull::new_unchecked(ptr) })
            }
            _ => {
                let err = ArenaExhausted {
                    requested: total.unwrap_or(usize::MAX),
                    remaining: self.remaining(),
                };
                debug!(
                    "arena exhausted: requested {} bytes, {} remaining",
                    err.requested, err.remaining
                );
                Err(err)
            }
        }
    }

    fn base_addr(&self) -> usize {
        self.storage.get() as usize
    }
}

impl<const N: usize> Default for BumpArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn align_up(value: usize, align: usize) -> Option<usize> {
    Some(value.checked_add(align - 1)? & !(align - 1))
}

/// A [`BumpArena`] shared by the whole program.
///
/// # Safety
///
/// Using this arena is only safe if there is only one thread of execution.
/// Even though `GlobalArena` is `Sync`, the cursor is updated without any
/// synchronisation.
pub struct GlobalArena<const N: usize>(BumpArena<N>);

impl<const N: usize> GlobalArena<N> {
    pub const fn new() -> GlobalArena<N> {
        GlobalArena(BumpArena::new())
    }

    /// The arena behind the allocator.
    pub fn arena(&self) -> &BumpArena<N> {
        &self.0
    }
}

impl<const N: usize> Default for GlobalArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: single thread of execution, see the type documentation.
unsafe impl<const N: usize> Sync for GlobalArena<N> {}

unsafe impl<const N: usize> GlobalAlloc for GlobalArena<N> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.0
            .allocate_layout(layout)
            .map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        self.0.release(ptr)
    }
}

#[cfg(all(feature = "global-allocator", not(test)))]
#[global_allocator]
static HEAP: GlobalArena<HEAP_SIZE> = GlobalArena::new();
