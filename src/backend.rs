//! Kernel backend selection.
//!
//! The matrix product is the only operation that runs data-parallel. This
//! module decides, process-wide, whether it does.
//!
//! # Supported Backends
//!
//! - `Parallel`: rows of the output are split across the rayon pool (default).
//! - `Sequential`: a single-threaded loop, useful when the caller already
//!   parallelizes at a coarser level or wants a quiet thread pool.
//!
//! Both kernels accumulate every dot product in the same order, so switching
//! backends never changes results.
//!
//! The backend is stored globally using an `AtomicU8`, enabling fast
//! switching at runtime.

use core::sync::atomic::{AtomicU8, Ordering};

/// Enumeration of matrix-product kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Backend {
    /// Row-parallel kernel on the rayon global pool (default).
    #[default]
    Parallel = 0,
    /// Plain single-threaded kernel.
    Sequential,
}

impl TryFrom<u8> for Backend {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Parallel),
            1 => Ok(Self::Sequential),
            _ => Err(()),
        }
    }
}

/// Internal global state for the active backend.
static GLOBAL_DEFAULT_BACKEND: AtomicU8 = AtomicU8::new(Backend::Parallel as u8);

/// Sets the kernel used by every subsequent matrix product.
///
/// # Example
///
/// ```
/// use tensorflux::backend::{set_backend, get_backend, Backend};
/// set_backend(Backend::Sequential);
/// assert_eq!(get_backend(), Backend::Sequential);
/// set_backend(Backend::Parallel);
/// ```
pub fn set_backend(b: Backend) {
    log::trace!("matmul backend set to {b:?}");
    GLOBAL_DEFAULT_BACKEND.store(b as u8, Ordering::Release);
}

/// Returns the currently active kernel.
///
/// If the stored value is invalid, defaults to [`Backend::Parallel`].
#[must_use]
pub fn get_backend() -> Backend {
    Backend::try_from(GLOBAL_DEFAULT_BACKEND.load(Ordering::Acquire)).unwrap_or_default()
}
