use crate::CallbackError;

/// Runs a user-supplied callable, turning a panic into [`CallbackError::Panicked`].
///
/// This is the only place the engine calls into size functions and render callbacks.
pub(crate) fn invoke<T>(
    f: impl FnOnce() -> Result<T, CallbackError>,
) -> Result<T, CallbackError> {
    #[cfg(feature = "std")]
    {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
            Ok(result) => result,
            Err(payload) => Err(CallbackError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    #[cfg(not(feature = "std"))]
    {
        f()
    }
}

#[cfg(feature = "std")]
fn panic_message(payload: &(dyn core::any::Any + Send)) -> alloc::string::String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).into()
    } else if let Some(s) = payload.downcast_ref::<alloc::string::String>() {
        s.clone()
    } else {
        "non-string panic payload".into()
    }
}
