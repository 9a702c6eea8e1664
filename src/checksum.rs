//! CRC-32 as used by PNG chunk trailers (reflected, polynomial 0xEDB88320).

const POLY: u32 = 0xEDB8_8320;

/// Compute the CRC-32 of `bytes`.
pub fn crc32(bytes: &[u8]) -> u32 {
    Crc32::new().update(bytes).finish()
}

/// Incremental CRC-32 state, so a chunk's type and payload can be fed
/// without concatenating them first.
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    register: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { register: 0xFFFF_FFFF }
    }

    pub fn update(mut self, bytes: &[u8]) -> Self {
        for &b in bytes {
            self.register ^= b as u32;
            for _ in 0..8 {
                self.register = if self.register & 1 != 0 {
                    (self.register >> 1) ^ POLY
                } else {
                    self.register >> 1
                };
            }
        }
        self
    }

    pub fn finish(self) -> u32 {
        self.register ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
