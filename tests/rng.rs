use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicUsize, Ordering};

use provider_rng::error::{Error, ErrorKind, Result};
use provider_rng::provider::{PRIMITIVE_PROVIDER, ProviderIdentifier};
use provider_rng::rand::{NativeProvider, RNG_ALGORITHM, RandomGenerator, RawAlgorithmHandle};

/// In-process provider subsystem that counts every native call.
#[derive(Debug, Default)]
struct FakeProvider {
    opens: AtomicUsize,
    fills: AtomicUsize,
    closes: AtomicUsize,
    fail_open: Option<i32>,
    fail_fill: Option<i32>,
}

impl FakeProvider {
    fn failing_open(status: i32) -> Self {
        Self {
            fail_open: Some(status),
            ..Self::default()
        }
    }

    fn failing_fill(status: i32) -> Self {
        Self {
            fail_fill: Some(status),
            ..Self::default()
        }
    }
}

impl NativeProvider for FakeProvider {
    fn open_algorithm(
        &self,
        algorithm: &'static str,
        provider: &ProviderIdentifier,
    ) -> Result<RawAlgorithmHandle> {
        assert_eq!(algorithm, RNG_ALGORITHM);
        assert!(!provider.name().is_empty());

        let n = self.opens.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(status) = self.fail_open {
            return Err(Error::with_raw_os_error(
                ErrorKind::ProviderOpenFailed,
                status,
            ));
        }
        Ok(RawAlgorithmHandle::from_raw(NonZeroUsize::new(n).unwrap()))
    }

    fn generate_random(&self, _handle: RawAlgorithmHandle, dest: &mut [u8]) -> Result<()> {
        let call = self.fills.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_fill {
            return Err(Error::with_raw_os_error(ErrorKind::GenerationFailed, status));
        }
        for (i, b) in dest.iter_mut().enumerate() {
            *b = (call as u8).wrapping_mul(31).wrapping_add(i as u8) ^ 0xA5;
        }
        Ok(())
    }

    fn close_algorithm(&self, _handle: RawAlgorithmHandle) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn generator(native: &FakeProvider) -> RandomGenerator<&FakeProvider> {
    RandomGenerator::with_native(native, ProviderIdentifier::default()).unwrap()
}

#[test]
fn empty_provider_identifier_is_rejected() {
    let err = ProviderIdentifier::new("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    assert!(ProviderIdentifier::new("Custom Provider").is_ok());
    assert_eq!(ProviderIdentifier::default(), PRIMITIVE_PROVIDER);
}

#[test]
fn construction_opens_one_handle() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    assert_eq!(native.opens.load(Ordering::SeqCst), 1);
    assert_eq!(generator.provider(), PRIMITIVE_PROVIDER);
}

#[test]
fn open_failure_surfaces_native_status() {
    let native = FakeProvider::failing_open(0x23);
    let err = RandomGenerator::with_native(&native, PRIMITIVE_PROVIDER).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ProviderOpenFailed);
    assert_eq!(err.raw_os_error(), Some(0x23));
    // No handle came into existence, so none may be closed.
    assert_eq!(native.closes.load(Ordering::SeqCst), 0);
}

#[test]
fn fill_overwrites_entire_buffer() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    let mut buf = [0u8; 64];
    generator.fill(&mut buf).unwrap();

    assert_eq!(native.fills.load(Ordering::SeqCst), 1);
    for (i, b) in buf.iter().enumerate() {
        assert_eq!(*b, (i as u8) ^ 0xA5);
    }
}

#[test]
fn zero_length_fill_is_a_no_op() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    generator.fill(&mut []).unwrap();

    assert_eq!(native.fills.load(Ordering::SeqCst), 0);
}

#[test]
fn fill_failure_passes_status_through() {
    let native = FakeProvider::failing_fill(-5);
    let generator = generator(&native);

    let mut buf = [0u8; 32];
    let err = generator.fill(&mut buf).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::GenerationFailed);
    assert_eq!(err.raw_os_error(), Some(-5));
}

#[test]
fn get_non_zero_bytes_is_unsupported() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    let err = generator.get_non_zero_bytes(&mut []).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let mut buf = [0u8; 16];
    let err = generator.get_non_zero_bytes(&mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    assert_eq!(native.fills.load(Ordering::SeqCst), 0);
}

#[test]
fn release_is_idempotent() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    generator.release();
    generator.release();

    assert_eq!(native.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn fill_after_release_fails_deterministically() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    generator.release();

    let mut buf = [0u8; 16];
    let err = generator.fill(&mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceReleased);

    // Even the zero-length no-op is refused once released.
    let err = generator.fill(&mut []).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceReleased);

    assert_eq!(native.fills.load(Ordering::SeqCst), 0);
}

#[test]
fn drop_closes_exactly_once() {
    let native = FakeProvider::default();

    drop(generator(&native));
    assert_eq!(native.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn release_then_drop_closes_exactly_once() {
    let native = FakeProvider::default();

    let generator = generator(&native);
    generator.release();
    drop(generator);

    assert_eq!(native.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_fills_each_observe_a_full_buffer() {
    let native = FakeProvider::default();
    let generator = generator(&native);

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let mut buf = [0u8; 32];
                generator.fill(&mut buf).unwrap();
                // The fake writes a per-call pattern; a torn buffer would mix two.
                let base = buf[0] ^ 0xA5;
                for (i, b) in buf.iter().enumerate() {
                    assert_eq!(*b, base.wrapping_add(i as u8) ^ 0xA5);
                }
            });
        }
    });

    assert_eq!(native.fills.load(Ordering::SeqCst), 8);
}
