//! Lock access for values shared between resolvers and threads.
//!
//! Writers only ever replace whole slots, so a lock poisoned by a panicking
//! holder still guards consistent data and is used as is.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub fn read<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
