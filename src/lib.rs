#![cfg_attr(not(feature = "std"), no_std)]
//! Library providing a cryptographically secure random byte generator backed by an
//! operating-system algorithm provider.
//!
//! A [`RandomGenerator`][rand::RandomGenerator] opens the random number generation
//! algorithm under a named [provider][provider::ProviderIdentifier] and owns the
//! resulting [algorithm handle][rand::AlgorithmHandle] until it is released. Byte
//! generation draws from the open handle in a single native call, is safe to invoke
//! concurrently on one generator, and never falls back to a weaker source on failure.
//!
//! # Features
//! * `alloc`: Enables operations that require the use of the `alloc` crate (owned key
//!   buffers via [`rand::generate_key`]).
//! * `std`: Enables operations that require use of the `std` crate (conversions to
//!   [`std::io::Error`]).

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;

pub mod provider;

pub mod traits;

pub mod rand;
