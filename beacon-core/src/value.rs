//! Observable Values
//!
//! An [`ObservableValue`] stores a value behind its own lock and notifies
//! observers through an embedded [`Observable`].
//!
//! # Notification Semantics
//!
//! `set` only writes when the new value differs from the stored one, but it
//! notifies every time it is called, changed or not. Observers therefore see
//! one notification per `set`, carrying the value stored at that moment.
//!
//! `get` followed by `set` is two separate critical sections. Threads that
//! read, modify and write concurrently can overwrite each other's updates;
//! the last writer wins. Use [`ObservableValue::update`] when the new value
//! has to be derived from the current one.

use std::fmt::Debug;

use parking_lot::Mutex;
use tracing::trace;

use crate::observer::{Observable, Publisher};

/// A value whose updates are broadcast to observers.
///
/// # Example
///
/// ```rust
/// use beacon_core::value::ObservableValue;
///
/// let temperature = ObservableValue::new(20);
/// temperature.set(21);
/// temperature.update(|t| t + 1);
///
/// assert_eq!(temperature.get(), 22);
/// ```
pub struct ObservableValue<T> {
    observable: Observable<T>,
    value: Mutex<T>,
}

impl<T> ObservableValue<T>
where
    T: Clone + PartialEq,
{
    /// Create an observable value with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            observable: Observable::new(),
            value: Mutex::new(value),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.lock().clone()
    }

    /// Store `value` if it differs from the current one, then notify.
    ///
    /// Notification happens even when the value is unchanged. Returns the
    /// number of subscribers notified.
    pub fn set(&self, value: T) -> usize {
        let stored = {
            let mut current = self.value.lock();
            if *current != value {
                *current = value;
            } else {
                trace!("value unchanged, notifying anyway");
            }
            current.clone()
        };

        self.observable.notify(stored)
    }

    /// Replace the value with `f(current)` in one critical section, then
    /// notify.
    ///
    /// Concurrent `update` calls never lose each other's changes.
    pub fn update<F>(&self, f: F) -> usize
    where
        F: FnOnce(&T) -> T,
    {
        let stored = {
            let mut current = self.value.lock();
            let next = f(&*current);
            if *current != next {
                *current = next;
            }
            current.clone()
        };

        self.observable.notify(stored)
    }

    /// Number of observers registered with this value.
    pub fn subscriber_count(&self) -> usize {
        self.observable.subscriber_count()
    }
}

impl<T> Default for ObservableValue<T>
where
    T: Clone + PartialEq + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Publisher for ObservableValue<T> {
    type Args = T;

    fn observable(&self) -> &Observable<T> {
        &self.observable
    }
}

impl<T> Debug for ObservableValue<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableValue")
            .field("value", &*self.value.lock())
            .field("subscriber_count", &self.observable.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{Observer, Subscriber};
    use std::sync::Arc;

    #[derive(Default)]
    struct Log(Mutex<Vec<i32>>);

    impl Subscriber<i32> for Log {
        fn on_notify(&self, value: &i32) {
            self.0.lock().push(*value);
        }
    }

    #[test]
    fn get_and_set() {
        let value = ObservableValue::new(0);
        assert_eq!(value.get(), 0);

        value.set(42);
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn set_notifies_even_when_unchanged() {
        let value = ObservableValue::new(5);
        let log = Observer::new(Log::default());
        log.register_with(&value);

        assert_eq!(value.set(5), 1);
        assert_eq!(value.set(6), 1);
        assert_eq!(value.set(6), 1);

        assert_eq!(*log.0.lock(), vec![5, 6, 6]);
    }

    #[test]
    fn update_applies_function_and_notifies() {
        let value = ObservableValue::new(10);
        let log = Observer::new(Log::default());
        log.register_with(&value);

        value.update(|v| v + 5);
        assert_eq!(value.get(), 15);
        assert_eq!(*log.0.lock(), vec![15]);
    }

    #[test]
    fn concurrent_updates_are_cumulative() {
        let value = Arc::new(ObservableValue::new(0));

        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let value = value.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        value.update(|v| v + n);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(value.get(), 250 * (1 + 2 + 3 + 4));
    }

    #[test]
    fn default_uses_type_default() {
        let value = ObservableValue::<i32>::default();
        assert_eq!(value.get(), 0);
        assert_eq!(value.subscriber_count(), 0);
    }
}
