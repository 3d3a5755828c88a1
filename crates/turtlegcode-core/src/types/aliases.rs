//! Type aliases for shared state.
//!
//! The generator is a single-owner, synchronous object. When the surrounding
//! system is multi-threaded (a script engine producing segments on one task, a
//! debounced rebuild on another) it is shared behind one of these aliases.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use turtlegcode_core::types::*;
//!
//! // Instead of: Arc<Mutex<GcodeGenerator>>
//! let generator: ThreadSafe<GcodeGenerator> = thread_safe(GcodeGenerator::new());
//! generator.lock().rebuild();
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<Mutex<T>>)
// =============================================================================

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex`, which is not poisoned by a panicking holder.
/// Never hold the guard across an `.await`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `ThreadSafe<T>` from a value.
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
