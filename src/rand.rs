//! Algorithm-handle lifecycle and random byte generation.
//!
//! The native provider subsystem sits behind [`NativeProvider`]; everything in this
//! module is about using it safely: [`AlgorithmHandle`] owns exactly one open
//! algorithm instance and releases it exactly once, and [`RandomGenerator`] wraps a
//! handle behind an internal lock so that one generator can serve concurrent fills.

use core::num::NonZeroUsize;

use spin::Mutex;

use crate::error::{Error, ErrorKind, Result};
use crate::provider::ProviderIdentifier;
use crate::traits::CsRand;

#[cfg(any(unix, windows))]
pub mod system;

/// Name of the random number generation algorithm opened under a provider.
pub const RNG_ALGORITHM: &str = "RNG";

/// A raw token identifying an open algorithm instance inside the native provider
/// subsystem.
///
/// The token carries no ownership; [`AlgorithmHandle`] is the owning wrapper.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct RawAlgorithmHandle(NonZeroUsize);

impl RawAlgorithmHandle {
    pub const fn from_raw(raw: NonZeroUsize) -> Self {
        Self(raw)
    }

    pub const fn into_raw(self) -> NonZeroUsize {
        self.0
    }
}

/// The native provider subsystem that opens algorithm instances and produces random
/// bytes.
///
/// Implementations are the actual entropy source; this crate only manages handle
/// ownership and call ordering on top of them.
pub trait NativeProvider {
    /// Opens the named algorithm under `provider`, returning a token for the new
    /// instance.
    ///
    /// Fails with [`ErrorKind::ProviderOpenFailed`] carrying the native status code
    /// verbatim when the native open call reports an error.
    fn open_algorithm(
        &self,
        algorithm: &'static str,
        provider: &ProviderIdentifier,
    ) -> Result<RawAlgorithmHandle>;

    /// Overwrites all of `dest` with random bytes drawn from the open instance, in
    /// one call.
    ///
    /// On failure the contents of `dest` are unspecified. Implementations must not
    /// retry or substitute bytes from a weaker source.
    fn generate_random(&self, handle: RawAlgorithmHandle, dest: &mut [u8]) -> Result<()>;

    /// Returns the instance named by `handle` to the native subsystem.
    ///
    /// Infallible for callers: implementations log and discard native close
    /// failures. Called at most once per token by [`AlgorithmHandle`].
    fn close_algorithm(&self, handle: RawAlgorithmHandle);
}

impl<P: NativeProvider> NativeProvider for &P {
    fn open_algorithm(
        &self,
        algorithm: &'static str,
        provider: &ProviderIdentifier,
    ) -> Result<RawAlgorithmHandle> {
        (**self).open_algorithm(algorithm, provider)
    }

    fn generate_random(&self, handle: RawAlgorithmHandle, dest: &mut [u8]) -> Result<()> {
        (**self).generate_random(handle, dest)
    }

    fn close_algorithm(&self, handle: RawAlgorithmHandle) {
        (**self).close_algorithm(handle)
    }
}

/// Owner of exactly one open algorithm instance.
///
/// Once released the handle is inert: release is idempotent, and any further fill
/// fails with [`ErrorKind::ResourceReleased`]. Dropping the handle releases it.
#[derive(Debug)]
pub struct AlgorithmHandle<P: NativeProvider> {
    native: P,
    raw: Option<RawAlgorithmHandle>,
}

impl<P: NativeProvider> AlgorithmHandle<P> {
    /// Opens the [`RNG_ALGORITHM`] algorithm under `provider`.
    ///
    /// On failure no native resource exists and no handle is returned.
    pub fn open(native: P, provider: &ProviderIdentifier) -> Result<Self> {
        let raw = native.open_algorithm(RNG_ALGORITHM, provider)?;

        Ok(Self {
            native,
            raw: Some(raw),
        })
    }

    /// Whether the handle has been released.
    pub fn is_released(&self) -> bool {
        self.raw.is_none()
    }

    /// Fills `dest` from the open instance.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        let raw = self.raw.ok_or_else(released)?;

        self.native.generate_random(raw, dest)
    }

    /// Returns the owned instance to the native subsystem.
    ///
    /// Idempotent: a second call is a no-op.
    pub fn release(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.native.close_algorithm(raw);
        }
    }
}

impl<P: NativeProvider> Drop for AlgorithmHandle<P> {
    fn drop(&mut self) {
        self.release();
    }
}

fn released() -> Error {
    Error::new_with_message(
        ErrorKind::ResourceReleased,
        "the generator's algorithm handle was released",
    )
}

/// A cryptographically secure random byte generator backed by one open algorithm
/// handle.
///
/// # Thread safety
/// [`RandomGenerator::fill`] may be called concurrently on one instance; calls
/// serialize on an internal lock, so each call observes an independent, fully
/// overwritten buffer. The native primitive is not assumed to tolerate concurrent
/// use of one handle.
#[derive(Debug)]
pub struct RandomGenerator<P: NativeProvider> {
    provider: ProviderIdentifier,
    handle: Mutex<AlgorithmHandle<P>>,
}

impl<P: NativeProvider> RandomGenerator<P> {
    /// Opens a generator over `native` using the given provider.
    ///
    /// Propagates open failures unchanged; on failure no generator exists.
    pub fn with_native(native: P, provider: ProviderIdentifier) -> Result<Self> {
        let handle = AlgorithmHandle::open(native, &provider)?;

        Ok(Self {
            provider,
            handle: Mutex::new(handle),
        })
    }

    /// The provider this generator was opened under.
    pub fn provider(&self) -> ProviderIdentifier {
        self.provider
    }

    /// Overwrites all of `dest` with freshly generated random bytes. Prior contents
    /// are ignored.
    ///
    /// An empty `dest` succeeds without a native call. Otherwise the whole buffer is
    /// filled in one native call; on failure the buffer contents are unspecified and
    /// the error is surfaced immediately, with no retry and no fallback source.
    ///
    /// Fails with [`ErrorKind::ResourceReleased`] once [`RandomGenerator::release`]
    /// has been observed, and with [`ErrorKind::GenerationFailed`] (native status
    /// code attached) when the native fill call reports an error.
    pub fn fill(&self, dest: &mut [u8]) -> Result<()> {
        let mut handle = self.handle.lock();

        if handle.is_released() {
            return Err(released());
        }

        if dest.is_empty() {
            return Ok(());
        }

        handle.fill(dest)
    }

    /// Non-zero byte generation is not provided by this generator.
    ///
    /// Always fails with [`ErrorKind::Unsupported`], for every `dest` including an
    /// empty one. This is a contract, not a missing feature.
    pub fn get_non_zero_bytes(&self, _dest: &mut [u8]) -> Result<()> {
        Err(Error::new_with_message(
            ErrorKind::Unsupported,
            "non-zero byte generation is not provided",
        ))
    }

    /// Releases the owned algorithm handle.
    ///
    /// Idempotent and infallible. Any in-flight fill completes first; no fill
    /// started afterwards can succeed.
    pub fn release(&self) {
        self.handle.lock().release();
    }
}

impl<P: NativeProvider> CsRand for RandomGenerator<P> {
    fn next_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.fill(bytes)
    }
}

// Fill takes `&self`, so a shared borrow is a full-featured source. This lets the
// process-wide instance feed `Generate`.
impl<P: NativeProvider> CsRand for &RandomGenerator<P> {
    fn next_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.fill(bytes)
    }
}

#[cfg(any(unix, windows))]
impl RandomGenerator<system::SystemProvider> {
    /// Opens a generator over the system provider subsystem using the platform's
    /// primitive algorithm provider.
    pub fn new() -> Result<Self> {
        Self::with_provider(ProviderIdentifier::default())
    }

    /// Opens a generator over the system provider subsystem using the given
    /// provider.
    pub fn with_provider(provider: ProviderIdentifier) -> Result<Self> {
        Self::with_native(system::SystemProvider, provider)
    }
}

#[cfg(any(unix, windows))]
static SHARED: spin::Once<RandomGenerator<system::SystemProvider>> = spin::Once::new();

/// The process-wide generator, lazily opened over the default provider on first use.
///
/// Construction is single-flight; a failed first open leaves the slot empty so a
/// later call may retry. The instance is never released by user code; its native
/// resource is reclaimed at process exit.
#[cfg(any(unix, windows))]
pub fn shared() -> Result<&'static RandomGenerator<system::SystemProvider>> {
    SHARED.try_call_once(RandomGenerator::new)
}

/// Generates a random key of exactly `size` bytes using the [`shared`] generator.
///
/// Fails with [`ErrorKind::InvalidInput`] when `size` is zero; fill errors propagate
/// unchanged.
#[cfg(all(feature = "alloc", any(unix, windows)))]
pub fn generate_key(size: usize) -> Result<alloc::vec::Vec<u8>> {
    if size == 0 {
        return Err(Error::new_with_message(
            ErrorKind::InvalidInput,
            "key size must be positive",
        ));
    }

    let mut key = alloc::vec![0u8; size];
    shared()?.fill(&mut key)?;

    Ok(key)
}
