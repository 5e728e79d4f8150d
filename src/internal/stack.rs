//! Resolution stack for circular dependency detection.

use std::cell::RefCell;

use crate::error::{WireError, WireResult};

const MAX_DEPTH: usize = 1024;

#[cfg(feature = "smallvec")]
type NameStack = smallvec::SmallVec<[String; 8]>;
#[cfg(not(feature = "smallvec"))]
type NameStack = Vec<String>;

// One stack per thread: a resolution chain never crosses threads, and
// concurrent `get` calls on different threads must not see each other's
// in-flight names.
thread_local! {
    static RESOLUTION_STACK: RefCell<NameStack> = RefCell::new(NameStack::new());
}

/// RAII frame marking one service name as mid-construction.
///
/// Entering a name that is already on the current thread's stack fails with
/// [`WireError::Circular`] carrying the full chain. The frame pops its entry
/// on drop, so the stack unwinds on every exit path: success, error return,
/// or a panicking factory.
pub(crate) struct Frame {
    _private: (),
}

impl Frame {
    pub(crate) fn enter(name: &str) -> WireResult<Frame> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            // Cycle check BEFORE pushing, so the reported path ends with the
            // repeated name.
            if stack.iter().any(|entry| entry == name) {
                let mut path: Vec<String> = stack.iter().cloned().collect();
                path.push(name.to_string());
                return Err(WireError::Circular(path));
            }

            if stack.len() >= MAX_DEPTH {
                return Err(WireError::DepthExceeded(stack.len()));
            }

            stack.push(name.to_string());
            Ok(Frame { _private: () })
        })
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

#[cfg(test)]
pub(crate) fn depth() -> usize {
    RESOLUTION_STACK.with(|stack| stack.borrow().len())
}
