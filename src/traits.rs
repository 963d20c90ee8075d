use crate::error::Result;

/// A cryptographically secure source of random bytes.
pub trait CsRand {
    fn next_bytes(&mut self, bytes: &mut [u8]) -> Result<()>;
}

/// The trait for producing new random values
pub trait Generate {
    fn new_from_sequence<R: CsRand>(rand: &mut R) -> Result<Self>
    where
        Self: Sized;

    fn fill_from_sequence<R: CsRand>(&mut self, rand: &mut R) -> Result<()>;
}

impl<const N: usize> Generate for [u8; N] {
    fn fill_from_sequence<R: CsRand>(&mut self, rand: &mut R) -> Result<()> {
        rand.next_bytes(self)
    }

    fn new_from_sequence<R: CsRand>(rand: &mut R) -> Result<Self> {
        let mut bytes: Self = bytemuck::zeroed();
        rand.next_bytes(&mut bytes)?;

        Ok(bytes)
    }
}

impl Generate for [u8] {
    fn fill_from_sequence<R: CsRand>(&mut self, rand: &mut R) -> Result<()> {
        rand.next_bytes(self)
    }

    // `new_from_sequence` is omitted: methods with a `where Self: Sized`
    // bound are not required (and cannot be written) when `Self` is unsized.
}
