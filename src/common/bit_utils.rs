use std::{cmp::min, fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

/// MSB-first bit buffer with a fixed bit capacity and a read cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity, cursor: 0 }
    }

    /// Reader over the first `bit_len` bits of `codewords`.
    pub fn from_codewords(codewords: &[u8], bit_len: usize) -> Self {
        debug_assert!(
            bit_len <= codewords.len() << 3,
            "Bit length exceeds codewords: Bits {bit_len}, Codewords {}",
            codewords.len()
        );
        let data = codewords[..(bit_len + 7) >> 3].to_vec();
        Self { data, len: bit_len, capacity: bit_len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bits not yet taken.
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= 16, "Bits from only u8 and u16 can be pushed: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        let bits = bits.to_u16().unwrap_or(0);
        let mut rem = size;
        while rem > 0 {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            let n = min(8 - offset, rem);
            let chunk = ((bits >> (rem - n)) & ((1 << n) - 1)) as u8;
            self.data[pos] |= chunk << (8 - offset - n);
            self.len += n;
            rem -= n;
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    /// Takes up to 16 bits, or `None` without moving the cursor when fewer remain.
    pub fn take_bits(&mut self, n: usize) -> Option<u16> {
        debug_assert!(n <= 16, "Cannot take more than 16 bits: N {n}");

        if self.cursor + n > self.len {
            return None;
        }

        let mut res = 0u16;
        let mut rem = n;
        while rem > 0 {
            let offset = self.cursor & 7;
            let pos = self.cursor >> 3;
            let k = min(8 - offset, rem);
            let chunk = (self.data[pos] >> (8 - offset - k)) & ((1u16 << k) - 1) as u8;
            res = (res << k) | chunk as u16;
            self.cursor += k;
            rem -= k;
        }
        Some(res)
    }

    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }

    /// Whether any of the next `n` bits (or the rest of the stream) is set.
    pub fn peek_nonzero(&self, n: usize) -> bool {
        let end = min(self.cursor + n, self.len);
        (self.cursor..end).any(|i| (self.data[i >> 3] << (i & 7)) & 0x80 != 0)
    }
}
