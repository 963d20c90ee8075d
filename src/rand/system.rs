//! The operating system's provider subsystem.

use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::{NativeProvider, RawAlgorithmHandle};
use crate::error::{Error, ErrorKind, Result};
use crate::provider::ProviderIdentifier;

/// The OS random source, exposed through the [`NativeProvider`] seam.
///
/// The source is process-global, so `open_algorithm` hands out process-local tokens
/// with no per-handle native state; close has nothing to tear down beyond logging.
/// Generation itself blocks in the OS call and returns only on success or hard
/// failure.
pub struct SystemProvider;

static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(1);

impl NativeProvider for SystemProvider {
    fn open_algorithm(
        &self,
        algorithm: &'static str,
        provider: &ProviderIdentifier,
    ) -> Result<RawAlgorithmHandle> {
        let raw = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);

        match NonZeroUsize::new(raw) {
            Some(raw) => {
                log::debug!("opened algorithm {algorithm} under provider {provider} (handle {raw})");
                Ok(RawAlgorithmHandle::from_raw(raw))
            }
            // Counter wrapped. Not reachable in any realistic process lifetime.
            None => Err(Error::new_with_message(
                ErrorKind::ProviderOpenFailed,
                "native handle space exhausted",
            )),
        }
    }

    fn generate_random(&self, _handle: RawAlgorithmHandle, dest: &mut [u8]) -> Result<()> {
        getrandom::fill(dest).map_err(|e| {
            if let Some(errno) = e.raw_os_error() {
                Error::from_raw_os_error(errno)
            } else {
                match e {
                    getrandom::Error::UNSUPPORTED => Error::new_with_message(
                        ErrorKind::Unsupported,
                        "the system random source is not supported on this target",
                    ),
                    getrandom::Error::UNEXPECTED => Error::new_with_message(
                        ErrorKind::GenerationFailed,
                        "the system random source reported an internal error",
                    ),
                    e => {
                        #[cfg(feature = "std")]
                        {
                            Error::new(ErrorKind::GenerationFailed, e)
                        }
                        #[cfg(not(feature = "std"))]
                        {
                            let _ = e;
                            Error::new_with_message(
                                ErrorKind::GenerationFailed,
                                "the system random source reported an error",
                            )
                        }
                    }
                }
            }
        })
    }

    fn close_algorithm(&self, handle: RawAlgorithmHandle) {
        // No native state to return; the OS source outlives every handle.
        log::debug!("closed algorithm handle {}", handle.into_raw());
    }
}
