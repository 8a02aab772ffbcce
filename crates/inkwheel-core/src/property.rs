//! Bindable values with coercion and synchronous change listeners.

use std::fmt;

/// Handle returned by `subscribe`, used to remove a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// An ordered list of listeners, invoked synchronously in registration order.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every listener with `value`.
    pub fn emit(&mut self, value: &T) {
        for (_, listener) in &mut self.entries {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// A value with a coercion rule and change listeners.
///
/// `set` coerces the incoming value, stores it and notifies listeners only
/// when the stored value actually changed.
pub struct Property<T> {
    value: T,
    coerce: fn(Option<T>) -> T,
    listeners: Listeners<T>,
}

impl<T: Clone + PartialEq> Property<T> {
    /// Create a property. `coerce` maps `None` (an invalid value) to a fallback.
    pub fn new(initial: T, coerce: fn(Option<T>) -> T) -> Self {
        Self {
            value: coerce(Some(initial)),
            coerce,
            listeners: Listeners::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Set a possibly-invalid value. Returns true when listeners were notified.
    pub fn set_value(&mut self, value: Option<T>) -> bool {
        let coerced = (self.coerce)(value);
        if coerced == self.value {
            return false;
        }
        self.value = coerced;
        self.listeners.emit(&self.value);
        true
    }

    /// Set a valid value. Returns true when listeners were notified.
    pub fn set(&mut self, value: T) -> bool {
        self.set_value(Some(value))
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn or_zero(value: Option<i32>) -> i32 {
        value.unwrap_or(0)
    }

    #[test]
    fn test_set_notifies_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut prop = Property::new(1, or_zero);
        let sink = seen.clone();
        prop.subscribe(move |v| sink.borrow_mut().push(*v));

        assert!(prop.set(2));
        assert!(!prop.set(2));
        assert!(prop.set(3));
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_invalid_value_is_coerced() {
        let mut prop = Property::new(5, or_zero);
        prop.set_value(None);
        assert_eq!(*prop.get(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let c = count.clone();
        let id = listeners.subscribe(move |_: &i32| *c.borrow_mut() += 1);
        listeners.emit(&1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&2);
        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }
}
