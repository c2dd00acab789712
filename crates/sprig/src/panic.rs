//! Turning panics raised by user callbacks into ordinary failures.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Render a panic payload as text.
///
/// String payloads are returned as-is; common numeric payloads are
/// formatted; anything else falls back to its `Debug` form.
///
/// # Examples
///
/// ```
/// use sprig::panic_message;
/// use std::any::Any;
///
/// let payload: Box<dyn Any + Send> = Box::new("boom");
/// assert_eq!(panic_message(payload.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .or_else(|| payload.downcast_ref::<i32>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<i64>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u32>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u64>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<usize>().map(ToString::to_string))
        .unwrap_or_else(|| format!("{payload:?}"))
}

/// Run `f`, converting a panic into `Err(message)`.
pub(crate) fn run_guarded<T, E>(
    f: impl FnOnce() -> Result<T, E>,
) -> Result<Result<T, E>, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}
