//! Key to block index mapping
//!
//! A key's block index is the `n` least significant bits of its byte form,
//! read as a little-endian integer.

use crate::error::{RaceAverageError, Result};

/// Byte form of a cache key
///
/// Implement this for custom key types to control which bits pick the
/// block index.
pub trait KeyBytes {
    fn key_bytes(&self) -> Vec<u8>;
}

macro_rules! impl_key_bytes_le {
    ($($t:ty),*) => {
        $(
            impl KeyBytes for $t {
                fn key_bytes(&self) -> Vec<u8> {
                    self.to_le_bytes().to_vec()
                }
            }
        )*
    };
}

impl_key_bytes_le!(i32, i64, u32, u64, f64);

/// Strings use UTF-16 code units, little-endian, two bytes per unit
impl KeyBytes for str {
    fn key_bytes(&self) -> Vec<u8> {
        self.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }
}

impl KeyBytes for String {
    fn key_bytes(&self) -> Vec<u8> {
        self.as_str().key_bytes()
    }
}

impl KeyBytes for [u8] {
    fn key_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl KeyBytes for Vec<u8> {
    fn key_bytes(&self) -> Vec<u8> {
        self.clone()
    }
}

impl<T: KeyBytes + ?Sized> KeyBytes for &T {
    fn key_bytes(&self) -> Vec<u8> {
        (**self).key_bytes()
    }
}

/// Block index of `key` using its `bits` least significant bits
pub fn block_index<K: KeyBytes + ?Sized>(key: &K, bits: u32) -> Result<usize> {
    index_from_bytes(&key.key_bytes(), bits)
}

/// Read the `bits` least significant bits of little-endian `bytes`.
///
/// An empty key always maps to index 0. Otherwise `bits` must be smaller
/// than the number of bits in the key.
pub fn index_from_bytes(bytes: &[u8], bits: u32) -> Result<usize> {
    if bytes.is_empty() {
        return Ok(0);
    }

    let available_bits = bytes.len() * 8;
    if bits as usize >= available_bits || bits >= usize::BITS {
        return Err(RaceAverageError::KeyIndexOutOfRange {
            bits,
            available_bits,
        }
        .into());
    }

    let index = (0..bits)
        .filter(|bit| (bytes[(bit / 8) as usize] >> (bit % 8)) & 1 == 1)
        .fold(0usize, |index, bit| index | (1 << bit));

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_keys() {
        assert_eq!(block_index(&1i32, 1).unwrap(), 1);
        assert_eq!(block_index(&1i32, 2).unwrap(), 1);
        assert_eq!(block_index(&2i32, 1).unwrap(), 0);
        assert_eq!(block_index(&2i32, 2).unwrap(), 2);
        assert_eq!(block_index(&13i32, 0).unwrap(), 0);
    }

    #[test]
    fn test_int_key_overflow() {
        let err = block_index(&1i32, 32).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RaceAverageError>(),
            Some(&RaceAverageError::KeyIndexOutOfRange {
                bits: 32,
                available_bits: 32
            })
        );
        assert!(block_index(&1i32, 31).is_ok());
    }

    #[test]
    fn test_string_keys() {
        assert_eq!(block_index("", 1).unwrap(), 0);
        assert_eq!(block_index("\u{1}", 1).unwrap(), 1);
        assert_eq!(block_index("1", 1).unwrap(), 1);
        assert_eq!(block_index("\u{ff}", 8).unwrap(), 255);
        assert_eq!(block_index(&"\u{ff}".to_string(), 9).unwrap(), 255);
    }

    #[test]
    fn test_string_bytes_are_utf16() {
        assert_eq!("A\u{ff}".key_bytes(), vec![0x41, 0x00, 0xff, 0x00]);
    }

    #[test]
    fn test_double_key() {
        assert_eq!(block_index(&2.99999999f64, 2).unwrap(), 2);
    }

    #[test]
    fn test_bits_span_bytes() {
        assert_eq!(index_from_bytes(&[0xff, 0x01], 9).unwrap(), 0x1ff);
        assert_eq!(index_from_bytes(&[0x00, 0x03], 10).unwrap(), 0x300);
        assert_eq!(index_from_bytes(&[0xff, 0xff], 4).unwrap(), 0xf);
    }
}
