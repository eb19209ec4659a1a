// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Software integer division and modulo.
//!
//! RV32I has no divide instructions. These routines implement restoring long
//! division one bit at a time, from bit 31 down to bit 0, in a fixed 32
//! iterations. Dividing by zero does not trap: every routine returns `0`
//! instead.

/// Unsigned long division. Returns `(quotient, remainder)`.
///
/// The divisor may be any non-zero value, including ones larger than the
/// dividend and ones with the top bit set.
pub fn divmod_u32(dividend: u32, divisor: u32) -> (u32, u32) {
    if divisor == 0 {
        return (0, 0);
    }

    let divisor = u64::from(divisor);
    let mut quotient = 0u32;
    // Shifting may briefly push the remainder past 32 bits when the divisor
    // has bit 31 set.
    let mut remainder = 0u64;

    for i in (0..32).rev() {
        remainder = (remainder << 1) | u64::from((dividend >> i) & 1);
        if remainder >= divisor {
            remainder -= divisor;
            quotient |= 1 << i;
        }
    }

    (quotient, remainder as u32)
}

/// Unsigned 32-bit division. Returns `0` when `divisor` is zero.
pub fn div_u32(dividend: u32, divisor: u32) -> u32 {
    divmod_u32(dividend, divisor).0
}

/// Unsigned 32-bit modulo. Returns `0` when `divisor` is zero.
pub fn mod_u32(dividend: u32, divisor: u32) -> u32 {
    divmod_u32(dividend, divisor).1
}

/// Signed 32-bit division, truncating towards zero.
///
/// Returns `0` when `divisor` is zero. `i32::MIN / -1` wraps to `i32::MIN`.
pub fn div_i32(dividend: i32, divisor: i32) -> i32 {
    if divisor == 0 {
        return 0;
    }

    let negative = (dividend < 0) ^ (divisor < 0);
    let quotient = div_u32(dividend.unsigned_abs(), divisor.unsigned_abs()) as i32;

    if negative {
        quotient.wrapping_neg()
    } else {
        quotient
    }
}

/// Signed 32-bit modulo. The result has the sign of the dividend.
///
/// Returns `0` when `divisor` is zero.
pub fn mod_i32(dividend: i32, divisor: i32) -> i32 {
    if divisor == 0 {
        return 0;
    }

    let remainder = mod_u32(dividend.unsigned_abs(), divisor.unsigned_abs()) as i32;

    if dividend < 0 {
        remainder.wrapping_neg()
    } else {
        remainder
    }
}

/// The routines under the names the compiler emits calls to on targets
/// without the M extension.
#[cfg(all(feature = "compiler-intrinsics", target_arch = "riscv32"))]
mod intrinsics {
    #[no_mangle]
    pub extern "C" fn __udivsi3(dividend: u32, divisor: u32) -> u32 {
        super::div_u32(dividend, divisor)
    }

    #[no_mangle]
    pub extern "C" fn __umodsi3(dividend: u32, divisor: u32) -> u32 {
        super::mod_u32(dividend, divisor)
    }

    #[no_mangle]
    pub extern "C" fn __divsi3(dividend: i32, divisor: i32) -> i32 {
        super::div_i32(dividend, divisor)
    }

    #[no_mangle]
    pub extern "C" fn __modsi3(dividend: i32, divisor: i32) -> i32 {
        super::mod_i32(dividend, divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_strategy::proptest;

    #[test]
    fn small_values() {
        assert_eq!(divmod_u32(100, 7), (14, 2));
        assert_eq!(divmod_u32(7, 100), (0, 7));
        assert_eq!(divmod_u32(0, 3), (0, 0));
        assert_eq!(div_u32(567, 1000), 0);
        assert_eq!(mod_u32(567, 1000), 567);
        assert_eq!(div_u32(0xdead_beef, 16), 0x0dea_dbee);
        assert_eq!(mod_u32(0xdead_beef, 16), 0xf);
    }

    #[test]
    fn divisor_with_top_bit_set() {
        assert_eq!(divmod_u32(u32::MAX, 0x8000_0000), (1, 0x7fff_ffff));
        assert_eq!(divmod_u32(u32::MAX, u32::MAX), (1, 0));
        assert_eq!(divmod_u32(u32::MAX - 1, u32::MAX), (0, u32::MAX - 1));
        assert_eq!(divmod_u32(0xc000_0000, 0x8000_0001), (1, 0x3fff_ffff));
    }

    #[test]
    fn signed_truncates_towards_zero() {
        assert_eq!(div_i32(-7, 2), -3);
        assert_eq!(mod_i32(-7, 2), -1);
        assert_eq!(div_i32(7, -2), -3);
        assert_eq!(mod_i32(7, -2), 1);
        assert_eq!(div_i32(-7, -2), 3);
        assert_eq!(mod_i32(-7, -2), -1);
    }

    #[test]
    fn signed_extremes() {
        assert_eq!(div_i32(i32::MIN, -1), i32::MIN);
        assert_eq!(mod_i32(i32::MIN, -1), 0);
        assert_eq!(div_i32(i32::MIN, 1), i32::MIN);
        assert_eq!(div_i32(i32::MIN, i32::MIN), 1);
        assert_eq!(mod_i32(i32::MAX, i32::MIN), i32::MAX);
        assert_eq!(mod_i32(i32::MIN, i32::MAX), -1);
    }

    // Dividing by zero is a deliberate non-trapping fallback.
    #[proptest]
    fn division_by_zero_returns_zero(unsigned: u32, signed: i32) {
        prop_assert_eq!(div_u32(unsigned, 0), 0);
        prop_assert_eq!(mod_u32(unsigned, 0), 0);
        prop_assert_eq!(div_i32(signed, 0), 0);
        prop_assert_eq!(mod_i32(signed, 0), 0);
    }

    #[proptest]
    fn unsigned_matches_hardware(a: u32, #[strategy(1u32..)] b: u32) {
        let (q, r) = divmod_u32(a, b);
        prop_assert_eq!(q, a / b);
        prop_assert_eq!(r, a % b);
        prop_assert_eq!(q.wrapping_mul(b).wrapping_add(r), a);
        prop_assert!(r < b);
    }

    #[proptest]
    fn signed_identity_holds(a: i32, #[filter(#b != 0)] b: i32) {
        let q = div_i32(a, b);
        let r = mod_i32(a, b);
        prop_assert_eq!(q.wrapping_mul(b).wrapping_add(r), a);
        prop_assert!(r == 0 || (r < 0) == (a < 0));
        prop_assert_eq!(q, a.wrapping_div(b));
        prop_assert_eq!(r, a.wrapping_rem(b));
    }
}
