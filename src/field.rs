// This file is part of sidh-rs.
// Copyright (c) 2017 Erkan Tairi
// See LICENSE for licensing information.
//
// Author:
// - Erkan Tairi <erkan.tairi@gmail.com>
//

//! This module contains finite field arithmetic functionality for SIDH,
//! which is not part of the public API.
//!
//! Elements of `F_p` and `F_{p^2}` are represented in Montgomery form
//! (`aR mod p`, `R = 2^768`). Every arithmetic operation below is built
//! out of a small set of named primitives (`fpadd751`, `fpsub751`,
//! `mul751`, `rdc751`, `srdc751`) so that the rest of the crate never
//! touches a limb array directly.

use core::fmt::Debug;

use core::cmp::{Eq, PartialEq};

use core::ops::{Add, AddAssign};
use core::ops::{Sub, SubAssign};
use core::ops::{Mul, MulAssign};
use core::ops::Neg;

use subtle::ConditionallySelectable;
use subtle::ConditionallySwappable;
use subtle::{Equal, slices_equal};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen, QuickCheck};
#[cfg(test)]
use rand::{Rand, Rng};

use constants::{P751, MONTGOMERY_R, MONTGOMERY_RSQ};
use error::{CoreError, CoreResult};

/// Number of 64-bit words needed to hold an `F_p751` element.
pub const FP751_NUM_WORDS: usize = 12;

/// Represents an element of the base field `F_p751`, in Montgomery form.
#[derive(Copy, Clone)]
pub struct Fp751Element(pub [u64; FP751_NUM_WORDS]);

/// A double-width accumulator for holding the un-reduced product of two
/// `Fp751Element`s, before `rdc751` brings it back down to one width.
#[derive(Copy, Clone)]
pub struct Fp751X2(pub [u64; 2 * FP751_NUM_WORDS]);

//-----------------------------------------------------------------------------//
//                      Wide arithmetic primitives                             //
//-----------------------------------------------------------------------------//
//
// These are the only functions in the crate that know the word width of the
// modulus. Everything above this line operates purely in terms of them.

/// Add-with-carry of a single limb pair; returns `(sum, carry_out)`.
#[inline(always)]
fn adc(a: u64, b: u64, carry_in: u64) -> (u64, u64) {
    let sum = (a as u128) + (b as u128) + (carry_in as u128);
    (sum as u64, (sum >> 64) as u64)
}

/// Subtract-with-borrow of a single limb pair; returns `(diff, borrow_out)`.
#[inline(always)]
fn sbb(a: u64, b: u64, borrow_in: u64) -> (u64, u64) {
    let diff = (a as u128).wrapping_sub(b as u128).wrapping_sub(borrow_in as u128);
    (diff as u64, ((diff >> 127) & 1) as u64)
}

/// `result = a + b mod 2*p`. Since both inputs are assumed in `[0, 2p)`,
/// the result of the raw limb addition is conditionally reduced by
/// subtracting `2p` once.
pub fn fpadd751(a: &Fp751Element, b: &Fp751Element, result: &mut Fp751Element) {
    let mut carry = 0u64;
    let mut sum = [0u64; FP751_NUM_WORDS];
    for i in 0..FP751_NUM_WORDS {
        let (s, c) = adc(a.0[i], b.0[i], carry);
        sum[i] = s;
        carry = c;
    }
    // 2*p751, so that a,b in [0,2p) sum to something in [0,4p); a single
    // conditional subtraction of 2p brings it back into [0,2p).
    let mut two_p = [0u64; FP751_NUM_WORDS];
    let mut c = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (d, carry_out) = adc(P751.0[i], P751.0[i], c);
        two_p[i] = d;
        c = carry_out;
    }

    let mut trial = [0u64; FP751_NUM_WORDS];
    let mut borrow = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (d, b_out) = sbb(sum[i], two_p[i], borrow);
        trial[i] = d;
        borrow = b_out;
    }
    // If borrow == 1, sum < 2p already, so keep sum; else keep trial.
    let choice = Choice::from((1 - borrow) as u8);
    for i in 0..FP751_NUM_WORDS {
        sum[i] = u64::conditional_select(sum[i], trial[i], choice);
    }
    result.0 = sum;
}

/// `result = a - b mod 2*p`.
pub fn fpsub751(a: &Fp751Element, b: &Fp751Element, result: &mut Fp751Element) {
    let mut borrow = 0u64;
    let mut diff = [0u64; FP751_NUM_WORDS];
    for i in 0..FP751_NUM_WORDS {
        let (d, b_out) = sbb(a.0[i], b.0[i], borrow);
        diff[i] = d;
        borrow = b_out;
    }
    // If the subtraction borrowed, add back 2p.
    let mut two_p = [0u64; FP751_NUM_WORDS];
    let mut c = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (d, carry_out) = adc(P751.0[i], P751.0[i], c);
        two_p[i] = d;
        c = carry_out;
    }
    let mut corrected = [0u64; FP751_NUM_WORDS];
    let mut carry = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (d, c_out) = adc(diff[i], two_p[i], carry);
        corrected[i] = d;
        carry = c_out;
    }
    let choice = Choice::from(borrow as u8);
    for i in 0..FP751_NUM_WORDS {
        diff[i] = u64::conditional_select(diff[i], corrected[i], choice);
    }
    result.0 = diff;
}

/// Schoolbook 12x12-limb wide multiplication: `result = a*b` (no reduction).
pub fn mul751(a: &Fp751Element, b: &Fp751Element, result: &mut Fp751X2) {
    let mut acc = [0u64; 2 * FP751_NUM_WORDS];
    for i in 0..FP751_NUM_WORDS {
        let mut carry = 0u64;
        for j in 0..FP751_NUM_WORDS {
            let prod = (a.0[i] as u128) * (b.0[j] as u128);
            let sum = (acc[i + j] as u128) + prod + (carry as u128);
            acc[i + j] = sum as u64;
            carry = (sum >> 64) as u64;
        }
        acc[i + FP751_NUM_WORDS] = acc[i + FP751_NUM_WORDS].wrapping_add(carry);
    }
    result.0 = acc;
}

/// Montgomery reduction: `result = x * R^{-1} mod p`, where `x` is given
/// as an un-reduced double-width product. Since the lowest limb of
/// `p751` is `2^64 - 1` (i.e. `p751 === -1 mod 2^64`), the Montgomery
/// constant `N0' = -p751^{-1} mod 2^64` is simply `1`.
pub fn rdc751(x: &Fp751X2, result: &mut Fp751Element) {
    const N0PRIME: u64 = 1;
    let mut t = x.0;
    for i in 0..FP751_NUM_WORDS {
        let m = t[i].wrapping_mul(N0PRIME);
        let mut carry = 0u64;
        for j in 0..FP751_NUM_WORDS {
            let prod = (m as u128) * (P751.0[j] as u128);
            let sum = (t[i + j] as u128) + prod + (carry as u128);
            t[i + j] = sum as u64;
            carry = (sum >> 64) as u64;
        }
        // Propagate the remaining carry up through the high half.
        let mut k = i + FP751_NUM_WORDS;
        while carry != 0 && k < 2 * FP751_NUM_WORDS {
            let sum = (t[k] as u128) + (carry as u128);
            t[k] = sum as u64;
            carry = (sum >> 64) as u64;
            k += 1;
        }
    }
    let mut out = [0u64; FP751_NUM_WORDS];
    out.copy_from_slice(&t[FP751_NUM_WORDS..2 * FP751_NUM_WORDS]);
    result.0 = out;
}

/// Strong (canonical) reduction: brings a representative in `[0, 2p)`
/// down to one in `[0, p)`, by a single conditional subtraction.
pub fn srdc751(a: &mut Fp751Element) {
    let mut borrow = 0u64;
    let mut diff = [0u64; FP751_NUM_WORDS];
    for i in 0..FP751_NUM_WORDS {
        let (d, b_out) = sbb(a.0[i], P751.0[i], borrow);
        diff[i] = d;
        borrow = b_out;
    }
    // If borrow == 1, a < p already: keep a. Else: keep diff.
    let choice = Choice::from((1 - borrow) as u8);
    let mut out = a.0;
    for i in 0..FP751_NUM_WORDS {
        out[i] = u64::conditional_select(out[i], diff[i], choice);
    }
    a.0 = out;
}

/// `mp_add751x2`: double-width addition, used when combining two
/// double-width accumulators before a single reduction (e.g. the
/// extension-field Karatsuba product).
pub fn mp_add751x2(a: &Fp751X2, b: &Fp751X2, result: &mut Fp751X2) {
    let mut carry = 0u64;
    let mut sum = [0u64; 2 * FP751_NUM_WORDS];
    for i in 0..2 * FP751_NUM_WORDS {
        let (s, c) = adc(a.0[i], b.0[i], carry);
        sum[i] = s;
        carry = c;
    }
    result.0 = sum;
}

/// `mp_sub751x2`: double-width subtraction.
pub fn mp_sub751x2(a: &Fp751X2, b: &Fp751X2, result: &mut Fp751X2) {
    let mut borrow = 0u64;
    let mut diff = [0u64; 2 * FP751_NUM_WORDS];
    for i in 0..2 * FP751_NUM_WORDS {
        let (d, b_out) = sbb(a.0[i], b.0[i], borrow);
        diff[i] = d;
        borrow = b_out;
    }
    result.0 = diff;
}

/// Checks whether the 384-bit little-endian scalar `scalar` is strictly
/// less than `3^239`. Used by Bob's keypair generation to reject and
/// resample out-of-range scalars.
pub fn checklt238(scalar: &[u8; 48], result: &mut u32) {
    // 3^239, little-endian bytes.
    const THREE_238: [u8; 48] = [235, 142, 138, 135, 159, 84, 104, 201, 62, 110, 199, 124,
        63, 161, 177, 89, 169, 109, 135, 190, 110, 125, 134, 233, 132, 128, 116, 37,
        203, 69, 80, 43, 86, 104, 198, 173, 123, 249, 9, 41, 225, 192, 113, 31, 84,
        93, 254, 6];
    let mut borrow: i32 = 0;
    for i in 0..48 {
        let diff = (scalar[i] as i32) - (THREE_238[i] as i32) - borrow;
        borrow = if diff < 0 { 1 } else { 0 };
    }
    // borrow == 1 means scalar < 3^238 (strictly), which is what callers need.
    *result = borrow as u32;
}

/// Multiplies the 384-bit little-endian scalar `scalar` by 3 in place.
pub fn mulby3(scalar: &mut [u8; 48]) {
    let mut double = [0u8; 48];
    let mut carry = 0u16;
    for i in 0..48 {
        let d = (scalar[i] as u16) * 2 + carry;
        double[i] = d as u8;
        carry = d >> 8;
    }
    let mut carry = 0u16;
    for i in 0..48 {
        let s = (double[i] as u16) + (scalar[i] as u16) + carry;
        scalar[i] = s as u8;
        carry = s >> 8;
    }
}

//-----------------------------------------------------------------------------//
//                    subtle::Choice-free conditional select                   //
//-----------------------------------------------------------------------------//
//
// The rest of the crate (inherited from the reference this one descends
// from) uses the pre-1.0 `subtle` API: `ConditionallySelectable`,
// `ConditionallySwappable`, and `Equal`, all masking on a bare `u8` rather
// than a `Choice` wrapper. We keep that surface (so `curve.rs`/`isogeny.rs`
// don't change shape) but need a word-level conditional-select primitive
// of our own to implement the primitives above without branching on
// secret data. `Choice` here is a local helper, not `subtle::Choice`.
struct Choice(u8);

impl Choice {
    fn from(bit: u8) -> Choice {
        Choice(bit)
    }
}

trait CondSelect: Sized + Copy {
    fn conditional_select(a: Self, b: Self, choice: Choice) -> Self;
}

impl CondSelect for u64 {
    #[inline(always)]
    fn conditional_select(a: u64, b: u64, choice: Choice) -> u64 {
        let mask = 0u64.wrapping_sub(choice.0 as u64);
        a ^ (mask & (a ^ b))
    }
}

// Bring the inherent method into scope under the same call syntax used
// above (`u64::conditional_select(a, b, choice)`).
use self::CondSelect as _;

//-----------------------------------------------------------------------------//
//                           Extension Field                                   //
//-----------------------------------------------------------------------------//

/// Represents an element of the extension field `F_{p^2}`.
#[derive(Copy, Clone, PartialEq)]
pub struct ExtensionFieldElement {
    /// This field element is in Montgomery form, so that the value `A` is
    /// represented by `aR mod p`.
    pub A: Fp751Element,
    /// This field element is in Montgomery form, so that the value `B` is
    /// represented by `bR mod p`.
    pub B: Fp751Element,
}

impl<'b> AddAssign<&'b ExtensionFieldElement> for ExtensionFieldElement {
    fn add_assign(&mut self, _rhs: &'b ExtensionFieldElement) {
        let result = (self as &ExtensionFieldElement) + _rhs;
        self.A = result.A;
        self.B = result.B;
    }
}

impl<'a, 'b> Add<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn add(self, _rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        let a = &self.A + &_rhs.A;
        let b = &self.B + &_rhs.B;

        ExtensionFieldElement{
            A: a,
            B: b
        }
    }
}

impl <'b> SubAssign<&'b ExtensionFieldElement> for ExtensionFieldElement {
    fn sub_assign(&mut self, _rhs: &'b ExtensionFieldElement) {
        let result = (self as &ExtensionFieldElement) - _rhs;
        self.A = result.A;
        self.B = result.B;
    }
}

impl<'a, 'b> Sub<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn sub(self, _rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        let a = &self.A - &_rhs.A;
        let b = &self.B - &_rhs.B;

        ExtensionFieldElement{
            A: a,
            B: b
        }
    }
}

impl<'b> MulAssign<&'b ExtensionFieldElement> for ExtensionFieldElement {
    fn mul_assign(&mut self, _rhs: &'b ExtensionFieldElement) {
        let result = (self as &ExtensionFieldElement) * _rhs;
        self.A = result.A;
        self.B = result.B;
    }
}

impl<'a, 'b> Mul<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn mul(self, _rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        // Alias self, _rhs for more readable formulas.
        let a = &self.A;
        let b = &self.B;
        let c = &_rhs.A;
        let d = &_rhs.B;

        // We want to compute
        //
        // (a + bi)*(c + di) = (a*c - b*d) + (a*d + b*c)i
        //
        // Use Karatsuba's trick: note that
        //
        // (b - a)*(c - d) = (b*c + a*d) - a*c - b*d
        //
        // so (a*d + b*c) = (b-a)*(c-d) + a*c + b*d.
        //
        let ac = a * c;                               // = a*c*R*R
        let bd = b * d;                               // = b*d*R*R
        let b_minus_a = b - a;                        // = (b-a)*R
        let c_minus_d = c - d;                        // = (c-d)*R

        let mut ad_plus_bc = &b_minus_a * &c_minus_d; // = (b-a)*(c-d)*R*R
        ad_plus_bc += &ac;                            // = ((b-a)*(c-d) + a*c)*R*R
        ad_plus_bc += &bd;                            // = ((b-a)*(c-d) + a*c + b*d)*R*R
        let _b = ad_plus_bc.reduce();                 // = (a*d + b*c)*R mod p

        let ac_minus_bd = &ac - &bd;                  // = (a*c - b*d)*R*R
        let _a = ac_minus_bd.reduce();                // = (a*c - b*d)*R mod p

        ExtensionFieldElement{
            A: _a,
            B: _b
        }
    }
}

impl <'a> Neg for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn neg(self) -> ExtensionFieldElement {
        let zero = ExtensionFieldElement::zero();
        let result = &zero - (self as &ExtensionFieldElement);
        result
    }
}

impl ConditionallySelectable for ExtensionFieldElement {
    fn conditional_swap(&mut self, other: &mut ExtensionFieldElement, choice: u8) {
        (&mut self.A).conditional_swap(&mut other.A, choice);
        (&mut self.B).conditional_swap(&mut other.B, choice);
    }
}

impl ConditionallySwappable for ExtensionFieldElement {}

impl Debug for ExtensionFieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "ExtensionFieldElement(A: {:?}\nB: {:?})", &self.A.0[..], &self.B.0[..])
    }
}

#[cfg(test)]
impl Arbitrary for ExtensionFieldElement {
    fn arbitrary<G: Gen>(g: &mut G) -> ExtensionFieldElement {
        let a = g.gen::<Fp751Element>();
        let b = g.gen::<Fp751Element>();
        ExtensionFieldElement{ A: a, B: b }
    }
}

#[cfg(test)]
impl Rand for ExtensionFieldElement {
    fn rand<R: Rng>(rng: &mut R) -> ExtensionFieldElement {
        let a = rng.gen::<Fp751Element>();
        let b = rng.gen::<Fp751Element>();
        ExtensionFieldElement{ A: a, B: b }
    }
}

impl ExtensionFieldElement {
    /// Construct a zero `ExtensionFieldElement`.
    pub fn zero() -> ExtensionFieldElement {
        ExtensionFieldElement{
            A: Fp751Element([0x0; FP751_NUM_WORDS]),
            B: Fp751Element([0x0; FP751_NUM_WORDS]),
        }
    }
    /// Construct a one `ExtensionFieldElement`.
    pub fn one() -> ExtensionFieldElement {
        ExtensionFieldElement{
            A: MONTGOMERY_R,
            B: Fp751Element([0x0; FP751_NUM_WORDS]),
        }
    }
    /// Set output to `1/x`.
    pub fn inv(&self) -> ExtensionFieldElement {
        let a = &self.A;
        let b = &self.B;

        // We want to compute
        //
        //    1          1     (a - bi)	    (a - bi)
        // -------- = -------- -------- = -----------
        // (a + bi)   (a + bi) (a - bi)   (a^2 + b^2)
        //
        // Letting c = 1/(a^2 + b^2), this is
        //
        // 1/(a+bi) = a*c - b*ci.
        //
        let mut asq = a * a;           // = a*a*R*R
        let bsq = b * b;               // = b*b*R*R
        asq = &asq + &bsq;             // = (a^2 + b^2)*R*R
        let mut asq_plus_bsq = PrimeFieldElement::zero();
        asq_plus_bsq.A = asq.reduce(); // = (a^2 + b^2)*R mod p
        // Now asq_plus_bsq = a^2 + b^2

        let asq_plus_bsq_inv = asq_plus_bsq.inv();
        let c = &asq_plus_bsq_inv.A;

        let ac = a * c;
        let _a = ac.reduce();

        let mut minus_b = Fp751Element::zero();
        minus_b = &minus_b - &b;
        let minus_bc = &minus_b * &c;
        let _b = minus_bc.reduce();

        ExtensionFieldElement{
            A: _a,
            B: _b
        }
    }
    // Set (y1, y2, y3)  = (1/x1, 1/x2, 1/x3).
    //
    // All xi, yi must be distinct.
    pub fn batch3_inv(x1: &ExtensionFieldElement, x2: &ExtensionFieldElement, x3: &ExtensionFieldElement) ->
                 (ExtensionFieldElement, ExtensionFieldElement, ExtensionFieldElement)
    {
        let x1x2 = x1 * x2;     // x1*x2
        let mut t = &x1x2 * x3;
        t = t.inv();            // 1/(x1*x2*x3)
        let y1 = &t * x2;
        let _y1 = &y1 * x3;     // 1/x1
        let y2 = &t * x1;
        let _y2 = &y2 * x3;     // 1/x2
        let _y3 = &t * &x1x2;   // 1/x3

        (_y1, _y2, _y3)
    }
    /// Set the output to `x^2`.
    pub fn square(&self) -> ExtensionFieldElement {
        let a = &self.A;
        let b = &self.B;

        // We want to compute
	    //
	    // (a + bi)*(a + bi) = (a^2 - b^2) + 2abi
        //
        let a2 = a + a;        // = a*R + a*R = 2*a*R
        let a_plus_b = a + b;  // = a*R + b*R = (a+b)*R
        let a_minus_b = a - b; // = a*R - b*R = (a-b)*R

        let asq_minus_bsq = &a_plus_b * &a_minus_b; // = (a+b)*(a-b)*R*R = (a^2 - b^2)*R*R
        let ab2 = &a2 * b;                          // = 2*a*b*R*R

        let _a = asq_minus_bsq.reduce(); // = (a^2 - b^2)*R mod p
        let _b = ab2.reduce();           // = 2*a*b*R mod p

        ExtensionFieldElement{
            A: _a,
            B: _b
        }
    }
    /// Set output to `i*x`, where `i` is the field's distinguished square
    /// root of `-1` (i.e. the `i` in `a + bi`), not the distortion map.
    pub fn mul_i(&self) -> ExtensionFieldElement {
        ExtensionFieldElement{ A: -(&self.B), B: self.A }
    }
    /// Set output to `sqrt(x)`, if `x` is a square in `GF(p^2)`.
    ///
    /// Unlike the rest of this module, this is not constant time: it takes
    /// a variable number of field inversions/square roots depending on
    /// whether `x` lies on the real axis, and it verifies its own output
    /// by squaring and retrying with the other candidate square root of
    /// the norm before giving up. This is the one place callers can
    /// observe a data-dependent failure, returned as `CoreError::NonResidue`
    /// rather than silently produced as undefined output.
    pub fn sqrt(&self) -> CoreResult<ExtensionFieldElement> {
        let a = PrimeFieldElement{ A: self.A };
        let b = PrimeFieldElement{ A: self.B };
        let zero = PrimeFieldElement::zero();

        if b.vartime_eq(&zero) {
            // x is purely real: either a or -a is a square in F_p, and
            // whichever one is gives us sqrt(x) on the real or imaginary
            // axis respectively.
            let neg_a = &zero - &a;
            let candidate = a.sqrt();
            if (&candidate * &candidate).vartime_eq(&a) {
                return Ok(ExtensionFieldElement{ A: candidate.A, B: zero.A });
            }
            let candidate = neg_a.sqrt();
            if (&candidate * &candidate).vartime_eq(&neg_a) {
                return Ok(ExtensionFieldElement{ A: zero.A, B: candidate.A });
            }
            return Err(CoreError::NonResidue);
        }

        // General case: write x = a + bi and look for y = x0 + x1*i with
        // y^2 = x. Then x0^2 + x1^2 = sqrt(a^2 + b^2) =: delta, and
        // x0^2 = (a + delta)/2, x1 = b/(2*x0).
        let norm = &a.square() + &b.square();
        let delta = norm.sqrt();

        let two = &PrimeFieldElement::one() + &PrimeFieldElement::one();
        let two_inv = two.inv();

        // Either (a + delta)/2 or (a - delta)/2 is a square in F_p; try
        // both candidates for delta's sign.
        for candidate_delta in [delta, &zero - &delta].iter() {
            let x0_sq = &(&a + candidate_delta) * &two_inv;
            let x0 = x0_sq.sqrt();
            if !(&x0 * &x0).vartime_eq(&x0_sq) {
                continue;
            }
            if x0.vartime_eq(&zero) {
                continue;
            }
            let x0_double_inv = (&x0 + &x0).inv();
            let x1 = &b * &x0_double_inv;
            let y = ExtensionFieldElement{ A: x0.A, B: x1.A };
            if y.square().vartime_eq(self) {
                return Ok(y);
            }
        }

        Err(CoreError::NonResidue)
    }
    /// Returns true if both sides are equal. Takes variable time.
    pub fn vartime_eq(&self, _rhs: &ExtensionFieldElement) -> bool {
        (&self.A == &_rhs.A) && (&self.B == &_rhs.B)
    }
    /// Convert the input to wire format.
    pub fn to_bytes(&self) -> [u8; 188] {
        let mut bytes = [0u8; 188];
        bytes[0..94].clone_from_slice(&self.A.to_bytes());
        bytes[94..188].clone_from_slice(&self.B.to_bytes());
        bytes
    }
    /// Read 188 bytes into the given `ExtensionFieldElement`.
    pub fn from_bytes(bytes: &[u8]) -> ExtensionFieldElement {
        assert!(bytes.len() >= 188, "Too short input to ExtensionFieldElement from_bytes, expected 188 bytes");
        let a = Fp751Element::from_bytes(&bytes[0..94]);
        let b = Fp751Element::from_bytes(&bytes[94..188]);
        ExtensionFieldElement{ A: a, B: b }
    }
}

//-----------------------------------------------------------------------------//
//                             Prime Field                                     //
//-----------------------------------------------------------------------------//

/// Represents an element of the prime field `F_p`.
#[derive(Copy, Clone, PartialEq)]
pub struct PrimeFieldElement {
    /// This field element is in Montgomery form, so that the value `A` is
	/// represented by `aR mod p`.
    pub A: Fp751Element
}

impl<'b> AddAssign<&'b PrimeFieldElement> for PrimeFieldElement {
    fn add_assign(&mut self, _rhs: &'b PrimeFieldElement) {
        let result = (self as &PrimeFieldElement) + _rhs;
        self.A = result.A;
    }
}

impl<'a, 'b> Add<&'b PrimeFieldElement> for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn add(self, _rhs: &'b PrimeFieldElement) -> PrimeFieldElement {
        let a = &self.A + &_rhs.A;
        PrimeFieldElement{ A: a }
    }
}

impl <'b> SubAssign<&'b PrimeFieldElement> for PrimeFieldElement {
    fn sub_assign(&mut self, _rhs: &'b PrimeFieldElement) {
        let result = (self as &PrimeFieldElement) - _rhs;
        self.A = result.A;
    }
}

impl<'a, 'b> Sub<&'b PrimeFieldElement> for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn sub(self, _rhs: &'b PrimeFieldElement) -> PrimeFieldElement {
        let a = &self.A - &_rhs.A;
        PrimeFieldElement{ A: a }
    }
}

impl<'b> MulAssign<&'b PrimeFieldElement> for PrimeFieldElement {
    fn mul_assign(&mut self, _rhs: &'b PrimeFieldElement) {
        let result = (self as &PrimeFieldElement) * _rhs;
        self.A = result.A;
    }
}

impl<'a, 'b> Mul<&'b PrimeFieldElement> for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn mul(self, _rhs: &'b PrimeFieldElement) -> PrimeFieldElement {
        // Alias self, _rhs for more readable formulas.
        let a = &self.A;      // = a*R
        let b = &_rhs.A;      // = b*R
        let ab = a * b;       // = a*b*R*R
        let _a = ab.reduce(); // = a*b*R mod p

        PrimeFieldElement{ A: _a }
    }
}

impl <'a> Neg for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn neg(self) -> PrimeFieldElement {
        let zero = PrimeFieldElement::zero();
        let result = &zero - (self as &PrimeFieldElement);
        result
    }
}

impl ConditionallySelectable for PrimeFieldElement {
    fn conditional_swap(&mut self, other: &mut PrimeFieldElement, choice: u8) {
        (&mut self.A).conditional_swap(&mut other.A, choice);
    }
}

impl ConditionallySwappable for PrimeFieldElement {}

impl Debug for PrimeFieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PrimeFieldElement(A: {:?})", &self.A.0[..])
    }
}

#[cfg(test)]
impl Arbitrary for PrimeFieldElement {
    fn arbitrary<G: Gen>(g: &mut G) -> PrimeFieldElement {
        let a = g.gen::<Fp751Element>();
        PrimeFieldElement{ A: a }
    }
}

#[cfg(test)]
impl Rand for PrimeFieldElement {
    fn rand<R: Rng>(rng: &mut R) -> PrimeFieldElement {
        let a = rng.gen::<Fp751Element>();
        PrimeFieldElement{ A: a }
    }
}

impl PrimeFieldElement {
    /// Construct a zero `PrimeFieldElement`.
    pub fn zero() -> PrimeFieldElement {
        PrimeFieldElement{ A: Fp751Element([0x0; FP751_NUM_WORDS]) }
    }
    /// Construct a one `PrimeFieldElement`.
    pub fn one() -> PrimeFieldElement {
        PrimeFieldElement{ A: MONTGOMERY_R }
    }
    /// Set the output to `x^2`.
    pub fn square(&self) -> PrimeFieldElement {
        let a = &self.A;      // = a*R
        let b = &self.A;      // = b*R
        let ab = a * b;       // = a*b*R*R
        let _a = ab.reduce(); // = a*b*R mod p

        PrimeFieldElement{ A: _a }
    }
    /// Raise self to `2^(2^k)`-th power, for `k >= 1`, by repeated squarings.
    fn pow2k(&self, k: u8) -> PrimeFieldElement {
        let mut result = self.square();
        for _ in 1..k { result = result.square(); }
        result
    }
    /// Set output to `x^((p-3)/4)`. If `x` is square, this is `1/sqrt(x)`.
    fn p34(&self) -> PrimeFieldElement {
        // Sliding-window strategy computed with Sage, awk, sed, and tr.
        //
        // This performs sum(powStrategy) = 744 squarings and len(mulStrategy)
        // = 137 multiplications, in addition to 1 squaring and 15
        // multiplications to build a lookup table.
        //
        // In total this is 745 squarings, 152 multiplications.  Since squaring
        // is not implemented for the prime field, this is 897 multiplications
        // in total.
        let pow_strategy: [u8; 137] = [5, 7, 6, 2, 10, 4, 6, 9, 8, 5, 9, 4, 7, 5, 5, 4, 8, 3, 9, 5, 5, 4, 10, 4, 6, 6, 6, 5, 8, 9, 3, 4, 9, 4, 5, 6, 6, 2, 9, 4, 5, 5, 5, 7, 7, 9, 4, 6, 4, 8, 5, 8, 6, 6, 2, 9, 7, 4, 8, 8, 8, 4, 6, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 2];
        let mul_strategy: [u8; 137] = [31, 23, 21, 1, 31, 7, 7, 7, 9, 9, 19, 15, 23, 23, 11, 7, 25, 5, 21, 17, 11, 5, 17, 7, 11, 9, 23, 9, 1, 19, 5, 3, 25, 15, 11, 29, 31, 1, 29, 11, 13, 9, 11, 27, 13, 19, 15, 31, 3, 29, 23, 31, 25, 11, 1, 21, 19, 15, 15, 21, 29, 13, 23, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 3];
        let initial_mul: u8 = 27;

        // Build a lookup table of odd multiples of x.
        let mut lookup = [PrimeFieldElement::zero(); 16];
        let xx: &PrimeFieldElement = &self.square(); // Set xx = x^2
        lookup[0] = *self;

        for i in 1..16 {
            lookup[i as usize] = &lookup[(i-1) as usize] * xx;
        }
        // Now lookup = {x, x^3, x^5, ... }
	    // so that lookup[i] = x^{2*i + 1}
	    // so that lookup[k/2] = x^k, for odd k
        let mut result = lookup[(initial_mul / 2) as usize];
        for i in 0..137 {
            result = result.pow2k(pow_strategy[i]);
            result = &result * &lookup[(mul_strategy[i] / 2) as usize];
        }
        result
    }
    /// Set output to `sqrt(x)`, if x is a square. If `x` is nonsquare output is undefined.
    fn sqrt(&self) -> PrimeFieldElement {
        let mut result = self.p34(); // result = (y^2)^((p-3)/4) = y^((p-3)/2)
        result = &result * self;     // result = y^2 * y^((p-3)/2) = y^((p+1)/2)
        // Now result^2 = y^(p+1) = y^2 = x, so result = sqrt(x).
        result
    }
    /// Set output to `1/x`.
    pub fn inv(&self) -> PrimeFieldElement {
        let mut result = self.square(); // result = x^2
        result = result.p34();          // result = (x^2)^((p-3)/4) = x^((p-3)/2)
        result = result.square();       // result = x^(p-3)
        result = &result * self;        // result = x^(p-2)
        result
    }
    /// Returns true if both sides are equal. Takes variable time.
    pub fn vartime_eq(&self, _rhs: &PrimeFieldElement) -> bool {
        &self.A == &_rhs.A
    }
}

//-----------------------------------------------------------------------------//
//                              Internals                                      //
//-----------------------------------------------------------------------------//

impl<'b> AddAssign<&'b Fp751Element> for Fp751Element {
    fn add_assign(&mut self, _rhs: &'b Fp751Element) {
        let result = (self as &Fp751Element) + _rhs;
        self.0 = result.0
    }
}

impl<'a, 'b> Add<&'b Fp751Element> for &'a Fp751Element {
    type Output = Fp751Element;
    fn add(self, _rhs: &'b Fp751Element) -> Fp751Element {
        let mut result = Fp751Element::zero();
        fpadd751(&self, _rhs, &mut result);
        result
    }
}

impl <'b> SubAssign<&'b Fp751Element> for Fp751Element {
    fn sub_assign(&mut self, _rhs: &'b Fp751Element) {
        let result = (self as &Fp751Element) - _rhs;
        self.0 = result.0
    }
}

impl<'a, 'b> Sub<&'b Fp751Element> for &'a Fp751Element {
    type Output = Fp751Element;
    fn sub(self, _rhs: &'b Fp751Element) -> Fp751Element {
        let mut result = Fp751Element::zero();
        fpsub751(&self, _rhs, &mut result);
        result
    }
}

impl<'a, 'b> Mul<&'b Fp751Element> for &'a Fp751Element {
    type Output = Fp751X2;
    fn mul(self, _rhs: &'b Fp751Element) -> Fp751X2 {
        let mut result = Fp751X2::zero();
        mul751(&self, _rhs, &mut result); // = a*c*R*R
        result
    }
}

impl <'a> Neg for &'a Fp751Element {
    type Output = Fp751Element;
    fn neg(self) -> Fp751Element {
        let zero = Fp751Element::zero();
        let result = &zero - (self as &Fp751Element);
        result
    }
}

impl Eq for Fp751Element {}
impl PartialEq for Fp751Element {
    /// Test equality between two `Fp751Element`s.
    ///
    /// # Warning
    ///
    /// This comparison is *not* constant time.
    fn eq(&self, other: &Fp751Element) -> bool {
        let mut _self = *self;
        let mut _other = *other;

        _self = _self.strong_reduce();
        _other = _other.strong_reduce();

        let mut eq: bool = true;
        for i in 0..FP751_NUM_WORDS {
            eq = (_self.0[i] == _other.0[i]) && eq;
        }
        eq
    }
}

impl Equal for Fp751Element {
    /// Test equality between two `Fp751Element`s.
    ///
    /// # Returns
    ///
    /// `1u8` if the two `Fp751Element`s are equal, and `0u8` otherwise.
    fn ct_eq(&self, other: &Fp751Element) -> u8 {
        slices_equal(&self.to_bytes(), &other.to_bytes())
    }
}

impl ConditionallySelectable for Fp751Element {
    /// Conditionally swap `self` and `other`, in constant time, depending
    /// on `choice`: a nonzero `choice` swaps, a zero `choice` is a no-op.
    /// Masks on every word rather than branching.
    fn conditional_swap(&mut self, other: &mut Fp751Element, choice: u8) {
        let mask = 0u64.wrapping_sub(choice as u64);
        for i in 0..FP751_NUM_WORDS {
            let t = mask & (self.0[i] ^ other.0[i]);
            self.0[i] ^= t;
            other.0[i] ^= t;
        }
    }
}

impl ConditionallySwappable for Fp751Element {}

impl Debug for Fp751Element {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Fp751Element: {:?}", &self.0[..])
    }
}

#[cfg(test)]
impl Arbitrary for Fp751Element {
    fn arbitrary<G: Gen>(g: &mut G) -> Fp751Element {
        // Generate a random element in [0, 2p) by generating random words
        // and masking the high limb down to the bit-length of 2p.
        let mut words = [0u64; FP751_NUM_WORDS];
        for i in 0..FP751_NUM_WORDS {
            words[i] = g.gen::<u64>();
        }
        words[FP751_NUM_WORDS - 1] %= 246065832128056; // high limb of 2*p751 + 1
        let mut e = Fp751Element(words);
        e = e.strong_reduce();
        e
    }
}

#[cfg(test)]
impl Rand for Fp751Element {
    fn rand<R: Rng>(rng: &mut R) -> Fp751Element {
        let mut words = [0u64; FP751_NUM_WORDS];
        for i in 0..FP751_NUM_WORDS {
            words[i] = rng.gen::<u64>();
        }
        words[FP751_NUM_WORDS - 1] %= 246065832128056;
        let mut e = Fp751Element(words);
        e = e.strong_reduce();
        e
    }
}

impl Fp751Element {
    pub fn zero() -> Fp751Element {
        Fp751Element([0x0; FP751_NUM_WORDS])
    }
    /// Reduce a field element in `[0, 2*p)` to one in `[0,p)`.
    pub fn strong_reduce(&self) -> Fp751Element {
        let mut _self = *self;
        srdc751(&mut _self);
        _self
    }
    /// Convert a canonical residue to its 94-byte little-endian wire form.
    pub fn to_bytes(&self) -> [u8; 94] {
        let reduced = self.strong_reduce();
        let mut bytes = [0u8; 94];
        for i in 0..FP751_NUM_WORDS {
            let word = reduced.0[i];
            for j in 0..8 {
                let idx = i * 8 + j;
                if idx < 94 {
                    bytes[idx] = ((word >> (8 * j)) & 0xff) as u8;
                }
            }
        }
        bytes
    }
    /// Read a 94-byte little-endian wire form into an `Fp751Element`,
    /// converting it into Montgomery form.
    pub fn from_bytes(bytes: &[u8]) -> Fp751Element {
        assert!(bytes.len() >= 94, "Too short input to Fp751Element from_bytes, expected 94 bytes");
        let mut words = [0u64; FP751_NUM_WORDS];
        for i in 0..FP751_NUM_WORDS {
            let mut word = 0u64;
            for j in 0..8 {
                let idx = i * 8 + j;
                if idx < 94 {
                    word |= (bytes[idx] as u64) << (8 * j);
                }
            }
            words[i] = word;
        }
        let plain = Fp751Element(words);
        // Convert to Montgomery form: montgomery(x) = reduce(x * R^2).
        let wide = &plain * &MONTGOMERY_RSQ;
        wide.reduce()
    }
}

impl<'b> AddAssign<&'b Fp751X2> for Fp751X2 {
    fn add_assign(&mut self, _rhs: &'b Fp751X2) {
        let result = (self as &Fp751X2) + _rhs;
        self.0 = result.0
    }
}

impl<'a, 'b> Add<&'b Fp751X2> for &'a Fp751X2 {
    type Output = Fp751X2;
    fn add(self, _rhs: &'b Fp751X2) -> Fp751X2 {
        let mut result = Fp751X2::zero();
        mp_add751x2(&self, _rhs, &mut result);
        result
    }
}

impl <'b> SubAssign<&'b Fp751X2> for Fp751X2 {
    fn sub_assign(&mut self, _rhs: &'b Fp751X2) {
        let result = (self as &Fp751X2) - _rhs;
        self.0 = result.0
    }
}

impl<'a, 'b> Sub<&'b Fp751X2> for &'a Fp751X2 {
    type Output = Fp751X2;
    fn sub(self, _rhs: &'b Fp751X2) -> Fp751X2 {
        let mut result = Fp751X2::zero();
        mp_sub751x2(&self, _rhs, &mut result);
        result
    }
}

impl Fp751X2 {
    pub fn zero() -> Fp751X2 {
        Fp751X2([0x0; 2 * FP751_NUM_WORDS])
    }
    /// Perform Montgomery reduction, `x R^{-1} (mod p)`.
    pub fn reduce(&self) -> Fp751Element {
        let mut result = Fp751Element::zero();
        rdc751(self, &mut result);
        result
    }
}


#[cfg(all(test, feature = "bench"))]
mod bench {
    use super::*;
    use test::Bencher;

    static BENCH_X: Fp751Element = Fp751Element([17026702066521327207, 5108203422050077993, 10225396685796065916, 11153620995215874678, 6531160855165088358, 15302925148404145445, 1248821577836769963, 9789766903037985294, 7493111552032041328, 10838999828319306046, 18103257655515297935, 27403304611634]);
    static BENCH_Y: Fp751Element = Fp751Element([4227467157325093378, 10699492810770426363, 13500940151395637365, 12966403950118934952, 16517692605450415877, 13647111148905630666, 14223628886152717087, 7167843152346903316, 15855377759596736571, 4300673881383687338, 6635288001920617779, 30486099554235]);

    #[bench]
    fn extension_field_element_add(b: &mut Bencher) {
        let z = ExtensionFieldElement{ A: BENCH_X, B: BENCH_Y };
        b.iter(|| &z + &z);
    }

    #[bench]
    fn extension_field_element_mul(b: &mut Bencher) {
        let z = ExtensionFieldElement{ A: BENCH_X, B: BENCH_Y };
        b.iter(|| &z * &z);
    }

    #[bench]
    fn extension_field_element_inv(b: &mut Bencher) {
        let z = ExtensionFieldElement{ A: BENCH_X, B: BENCH_Y };
        b.iter(|| z.inv());
    }

    #[bench]
    fn fp751_mul(b: &mut Bencher) {
        let mut z = Fp751X2::zero();
        b.iter(|| mul751(&BENCH_X, &BENCH_Y, &mut z));
    }

    #[bench]
    fn fp751_add(b: &mut Bencher) {
        let mut z = Fp751Element::zero();
        b.iter(|| fpadd751(&BENCH_X, &BENCH_Y, &mut z));
    }
}
