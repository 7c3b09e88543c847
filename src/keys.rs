//! Key types accepted by the radix tree.

use std::fmt;

use num_traits::{PrimInt, Unsigned};

use crate::node::BRANCH_FACTOR;

/// A fixed-width unsigned integer usable as a radix tree key.
///
/// Keys are consumed six bits at a time during descent, most significant
/// group first; [`RadixKey::slot`] extracts the group selected by a given
/// shift. Implemented for all the unsigned primitive types, which is the
/// full set the tree supports.
pub trait RadixKey: PrimInt + Unsigned + fmt::Debug {
    /// Width of the key type in bits.
    const BITS: u32;

    /// The slot index this key selects at the given bit shift.
    fn slot(self, shift: u32) -> usize;
}

macro_rules! impl_radix_key {
    ( $($t:ty),* ) => {
    $(
    impl RadixKey for $t {
        const BITS: u32 = <$t>::BITS;

        #[inline(always)]
        fn slot(self, shift: u32) -> usize {
            // Truncation is harmless: only the low six bits survive the mask.
            ((self >> shift) as usize) & (BRANCH_FACTOR - 1)
        }
    }
    ) *
    }
}

impl_radix_key!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_extracts_six_bit_groups() {
        let key: u64 = (5 << 12) | (9 << 6) | 33;
        assert_eq!(key.slot(12), 5);
        assert_eq!(key.slot(6), 9);
        assert_eq!(key.slot(0), 33);
    }

    #[test]
    fn slot_handles_narrow_and_wide_keys() {
        assert_eq!(255u8.slot(6), 3);
        assert_eq!(255u8.slot(0), 63);
        assert_eq!(u128::MAX.slot(126), 3);
        assert_eq!(u128::MAX.slot(60), 63);
    }

    #[test]
    fn bits_match_the_primitive() {
        assert_eq!(<u8 as RadixKey>::BITS, 8);
        assert_eq!(<u64 as RadixKey>::BITS, 64);
        assert_eq!(<u128 as RadixKey>::BITS, 128);
    }
}
