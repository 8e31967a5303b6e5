//! Values that are either owned by the host or by the component.

/// A value the host may control.
///
/// When the host supplies a value it is authoritative: [`get`](Self::get)
/// returns it and [`set`](Self::set) does not retain anything, the caller
/// only reports the next value upward. Without a host value the component
/// owns the state and `set` stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controllable<T> {
    external: Option<T>,
    internal: T,
}

impl<T: Clone> Controllable<T> {
    /// A host-owned value.
    pub fn controlled(value: T) -> Self {
        Self {
            internal: value.clone(),
            external: Some(value),
        }
    }

    /// A component-owned value seeded once from `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            external: None,
            internal: default,
        }
    }

    /// The authoritative value.
    pub fn get(&self) -> &T {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    /// Store `value` if the component owns the state.
    ///
    /// Returns whether the value was retained.
    pub fn set(&mut self, value: T) -> bool {
        if self.external.is_some() {
            return false;
        }
        self.internal = value;
        true
    }

    /// Apply the host's value for this update cycle.
    ///
    /// `Some` replaces whatever the component held, never merging. `None`
    /// hands ownership back to the component, continuing from the last
    /// authoritative value.
    pub fn sync(&mut self, external: Option<T>) {
        match external {
            Some(value) => {
                self.internal = value.clone();
                self.external = Some(value);
            }
            None => {
                if let Some(value) = self.external.take() {
                    self.internal = value;
                }
            }
        }
    }

    /// Whether the host currently owns the value.
    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Rewrite the authoritative value in place without changing ownership.
    pub(crate) fn map_in_place(&mut self, f: impl Fn(&mut T)) {
        if let Some(value) = self.external.as_mut() {
            f(value);
        }
        f(&mut self.internal);
    }
}

impl<T: Clone + Default> Default for Controllable<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}
