//! Per-test scratch state handed to every lifecycle hook.

use std::any::{Any, type_name};
use thiserror::Error;

/// Errors from accessing typed context state.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("No {0} stored in test context (was setup skipped?)")]
    Missing(&'static str),
}

/// Scratch memory owned by the runner for the duration of one test.
///
/// Created zero-filled right before `setup` and dropped after `teardown`.
/// Besides the raw scratch bytes a context holds one typed state value,
/// which is where hooks keep connections, fixtures and encoded payloads.
#[derive(Default)]
pub struct Context {
    scratch: Vec<u8>,
    state: Option<Box<dyn Any>>,
}

impl Context {
    /// Fresh context with `size` zeroed scratch bytes and no state.
    pub fn zeroed(size: usize) -> Self {
        Self {
            scratch: vec![0; size],
            state: None,
        }
    }

    pub fn scratch(&self) -> &[u8] {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut [u8] {
        &mut self.scratch
    }

    /// Store the typed state, replacing any previous value.
    pub fn insert<T: Any>(&mut self, value: T) {
        self.state = Some(Box::new(value));
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.state.as_ref()?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.state.as_mut()?.downcast_mut()
    }

    /// Typed state, or an error naming the missing type.
    pub fn state<T: Any>(&self) -> Result<&T, ContextError> {
        self.get().ok_or(ContextError::Missing(type_name::<T>()))
    }

    /// Mutable typed state, or an error naming the missing type.
    pub fn state_mut<T: Any>(&mut self) -> Result<&mut T, ContextError> {
        self.get_mut().ok_or(ContextError::Missing(type_name::<T>()))
    }

    /// Remove and return the typed state.
    pub fn take<T: Any>(&mut self) -> Option<T> {
        let state = self.state.take()?;
        match state.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(other) => {
                self.state = Some(other);
                None
            }
        }
    }

    /// Whether any typed state is stored.
    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("scratch_len", &self.scratch.len())
            .field("has_state", &self.state.is_some())
            .finish()
    }
}
