// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::{Quat, Vec3};

type Handler = Box<dyn FnMut()>;

/// A value plus an optional change handler.
///
/// Lets an owner (e.g. a transform node) learn that a position or rotation
/// was edited without polling. Writes that leave the value unchanged never
/// fire the handler; every write that does change it fires exactly once.
///
/// The handler is `FnMut` and not `Send`, so an `Observed` has one owner and
/// is mutated from one thread at a time.
///
/// # Examples
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use xform_math::{Observed, Quat};
///
/// let hits = Rc::new(Cell::new(0));
/// let mut rot = Observed::new(Quat::IDENTITY);
/// let counter = Rc::clone(&hits);
/// rot.on_change(move || counter.set(counter.get() + 1));
///
/// rot.set_w(1.0); // unchanged
/// rot.set_x(0.5);
/// assert_eq!(hits.get(), 1);
/// ```
pub struct Observed<T> {
    value: T,
    handler: Option<Handler>,
}

impl<T: Copy + PartialEq> Observed<T> {
    /// Wraps `value` with no handler registered.
    pub fn new(value: T) -> Self {
        Self {
            value,
            handler: None,
        }
    }

    /// Registers `handler`, replacing any previous one.
    pub fn on_change(&mut self, handler: impl FnMut() + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Drops the registered handler, if any.
    pub fn clear_on_change(&mut self) {
        self.handler = None;
    }

    /// `true` while a handler is registered.
    pub fn has_observer(&self) -> bool {
        self.handler.is_some()
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value
    }

    /// Unwraps the value, dropping the handler.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Stores `value`, notifying once if it differs from the current one.
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.notify();
        }
    }

    /// Applies `edit` to a copy of the value and stores it via
    /// [`Observed::set`].
    pub fn update(&mut self, edit: impl FnOnce(&mut T)) {
        let mut next = self.value;
        edit(&mut next);
        self.set(next);
    }

    fn notify(&mut self) {
        if let Some(handler) = self.handler.as_mut() {
            handler();
        }
    }

    #[allow(clippy::float_cmp)]
    fn set_component(&mut self, value: f32, read: fn(&T) -> f32, write: fn(&mut T, f32)) {
        if read(&self.value) != value {
            write(&mut self.value, value);
            self.notify();
        }
    }
}

impl Observed<Vec3> {
    /// Sets X, notifying if it changed.
    pub fn set_x(&mut self, value: f32) {
        self.set_component(value, Vec3::x, Vec3::set_x);
    }

    /// Sets Y, notifying if it changed.
    pub fn set_y(&mut self, value: f32) {
        self.set_component(value, Vec3::y, Vec3::set_y);
    }

    /// Sets Z, notifying if it changed.
    pub fn set_z(&mut self, value: f32) {
        self.set_component(value, Vec3::z, Vec3::set_z);
    }
}

impl Observed<Quat> {
    /// Sets X, notifying if it changed.
    pub fn set_x(&mut self, value: f32) {
        self.set_component(value, Quat::x, Quat::set_x);
    }

    /// Sets Y, notifying if it changed.
    pub fn set_y(&mut self, value: f32) {
        self.set_component(value, Quat::y, Quat::set_y);
    }

    /// Sets Z, notifying if it changed.
    pub fn set_z(&mut self, value: f32) {
        self.set_component(value, Quat::z, Quat::set_z);
    }

    /// Sets W, notifying if it changed.
    pub fn set_w(&mut self, value: f32) {
        self.set_component(value, Quat::w, Quat::set_w);
    }
}

impl<T: Copy + PartialEq + Default> Default for Observed<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observed")
            .field("value", &self.value)
            .field("has_observer", &self.handler.is_some())
            .finish()
    }
}
