use std::cell::UnsafeCell;

/// An `UnsafeCell` that may be shared across threads.
///
/// Holds plain data whose exclusive access is enforced by one of the locks
/// in this crate rather than by the type system. Dereferencing the pointer
/// from [`get`](Self::get) is sound only while the protecting lock is held
/// (or after every sharing thread has been joined).
#[derive(Debug, Default)]
pub struct SyncCell<T>(UnsafeCell<T>);

unsafe impl<T: Send> Sync for SyncCell<T> {}

impl<T> SyncCell<T> {
    pub fn new(value: T) -> Self {
        SyncCell(UnsafeCell::new(value))
    }

    pub fn get(&self) -> *mut T {
        self.0.get()
    }

    pub fn into_inner(self) -> T {
        self.0.into_inner()
    }
}
