//! Catalog of native algorithm provider identifiers.
//!
//! Providers are OS-registered implementations of cryptographic algorithms, named by
//! opaque platform-defined tokens. This module validates tokens and exposes the one
//! well-known default; everything else is passed through to the native subsystem
//! unchanged.

use crate::error::{Error, ErrorKind, Result};

/// An opaque identifier naming a native cryptographic algorithm provider.
///
/// Identifiers are never empty; [`ProviderIdentifier::new`] enforces this, so any
/// value of this type held by a generator is valid to hand to the native subsystem.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct ProviderIdentifier(&'static str);

/// The platform's primitive algorithm provider, used when no provider is named
/// explicitly.
pub const PRIMITIVE_PROVIDER: ProviderIdentifier =
    ProviderIdentifier("Microsoft Primitive Provider");

impl ProviderIdentifier {
    /// Validates `name` as a provider identifier.
    ///
    /// Fails with [`ErrorKind::InvalidInput`] when `name` is empty. No other
    /// validation is performed; unknown providers are rejected by the native open
    /// call, not here.
    pub fn new(name: &'static str) -> Result<Self> {
        if name.is_empty() {
            Err(Error::new_with_message(
                ErrorKind::InvalidInput,
                "provider identifier must not be empty",
            ))
        } else {
            Ok(Self(name))
        }
    }

    /// Returns the platform-defined name of the provider.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Default for ProviderIdentifier {
    fn default() -> Self {
        PRIMITIVE_PROVIDER
    }
}

impl core::fmt::Display for ProviderIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}
