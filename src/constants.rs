// This file is part of sidh-rs.
// Copyright (c) 2017 Erkan Tairi
// See LICENSE for licensing information.
//
// Author:
// - Erkan Tairi <erkan.tairi@gmail.com>
//

//! Parameter set for the core arithmetic: the SIKEp751 prime, the base
//! (supersingular) curve `E_0: y^2 = x^3 + x`, its distinguished torsion
//! points, and the isogeny-tree traversal strategies used by [`::sidh`] to
//! walk a 2^372- or 3^239-isogeny chain in the optimal number of steps.
//!
//! None of this is secret. Every value here is a public parameter of the
//! scheme, fixed at compile time, exactly as in the reference it's drawn
//! from.

use field::{Fp751Element, PrimeFieldElement, ExtensionFieldElement};

/// Number of 64-bit words needed to hold an element of `F_p`.
pub const NWORDS_FIELD: usize = 12;
/// Radix of a single field-element word.
pub const RADIX: u32 = 64;
/// log2 of `RADIX`.
pub const LOG2RADIX: u32 = 6;
/// Bit-length of `p751`.
pub const NBITS_FIELD: usize = 751;

/// `2^OALICE_BITS` is (approximately) Alice's isogeny degree.
pub const OALICE_BITS: usize = 372;
/// `3^OBOB_BITS` is (approximately) Bob's isogeny degree; `OBOB_BITS` is
/// also the number of 3-isogeny steps in Bob's strategy.
pub const OBOB_BITS: usize = 239;

/// The secret key size, in bytes.
pub const SECRET_KEY_SIZE: usize = 48;
/// The public key size, in bytes.
pub const PUBLIC_KEY_SIZE: usize = 564;
/// The shared secret size, in bytes.
pub const SHARED_SECRET_SIZE: usize = 188;

/// p751 = 2^372 * 3^239 - 1, as little-endian 64-bit words.
pub const P751: Fp751Element = Fp751Element([
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xeeafffffffffffff, 0xe3ec968549f878a8, 0xda959b1a13f7cc76,
    0x084e9867d6ebe876, 0x8562b5045cb25748, 0x0e12909f97badc66, 0x00006fe5d541f71c,
]);

/// `R = 2^768 mod p751`, the Montgomery radix. Multiplying a residue by
/// this constant converts it into Montgomery form.
pub const MONTGOMERY_R: Fp751Element = Fp751Element([
    0x249ad, 0x0, 0x0, 0x0, 0x0, 0x8310000000000000, 0x5527b1e4375c6c66, 0x697797bf3f4f24d0,
    0xc89db7b2ac5c4e2e, 0x4ca4b439d2076956, 0x10f7926c7512c7e9, 0x2d5b24bce5e2,
]);

/// `R^2 mod p751`, used to convert a residue into Montgomery form by a
/// single Montgomery multiplication: `aR mod p = mont_mul(a, R^2)`.
pub const MONTGOMERY_RSQ: Fp751Element = Fp751Element([
    0x233046449dad4058, 0xdb010161a696452a, 0x5e36941472e3fd8e, 0xf40bfe2082a2e706,
    0x4932cca8904f8751, 0x1f735f1f1ee7fc81, 0xa24f4d80c1048e18, 0xb56c383ccdb607c5,
    0x441dd47b735f9c90, 0x5673ed2c6a6ac82a, 0x06c905261132294b, 0x041ad830f1f35,
]);

/// The base curve `E_0: y^2 = x^3 + x`, in projective `(A:C)` form. Both
/// Alice's and Bob's isogeny walk start from this curve.
pub const E0_A: ExtensionFieldElement = ExtensionFieldElement {
    A: Fp751Element([0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0]),
    B: Fp751Element([0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0]),
};
pub const E0_C: ExtensionFieldElement = ExtensionFieldElement {
    A: Fp751Element([0x249ad, 0x0, 0x0, 0x0, 0x0, 0x8310000000000000, 0x5527b1e4375c6c66, 0x697797bf3f4f24d0, 0xc89db7b2ac5c4e2e, 0x4ca4b439d2076956, 0x10f7926c7512c7e9, 0x2d5b24bce5e2]),
    B: Fp751Element([0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0]),
};

/// `(A+2)/4` for the base curve `E_0` (`A = 0`), i.e. `1/2 mod p751`, in
/// the prime subfield.
pub const E0_A_PLUS2_OVER4: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0x124d6, 0x0, 0x0, 0x0, 0x0, 0xb8e0000000000000, 0x9c8a2434c0aa7287, 0xa206996ca9a378a3, 0x6876280d41a41b52, 0xe903b49f175ce04f, 0x0f8511860666d227, 0x4ea07cff6e7f]),
};

// Alice's distinguished torsion point generator: x(11, y) with
// y = oddsqrt(11^3 + 11), a point of order 3^239 on E_0's prime-subfield
// restriction.
pub const AFFINE_X_GEN_A: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0x192a73, 0x0, 0x0, 0x0, 0x0, 0xe6f0000000000000, 0x19024ab93916c5c3, 0x1dcd18cf68876318, 0x7d8c830e0c47ba23, 0x3588ea6a9388299a, 0x8259082aa8e3256c, 0x33533f160446]),
};
pub const AFFINE_Y_GEN_A: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xd38a264df57f3c8a, 0x9c0450d25042dcdf, 0xaf1ab7be7bbed0b6, 0xa307981c42b29630, 0x845a7e79e0fa2ecb, 0x7ef77ef732108f55, 0x97b5836751081f0d, 0x59e3d115f5275ff4, 0x9a02736282284916, 0xec39f71196540e99, 0xf8b521b28dcc965a, 0x6af0b9d7f54c]),
};

// Bob's distinguished torsion point generator: x(6, y) with
// y = oddsqrt(6^3 + 6), a point of order 2^372 on E_0's prime-subfield
// restriction.
pub const AFFINE_X_GEN_B: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xdba10, 0x0, 0x0, 0x0, 0x0, 0x3500000000000000, 0x3714fe4eb8399915, 0xc3a2584753eb43f4, 0xa3151d605c520428, 0xc116cf5232c7c978, 0x49a84d4b8efaf6aa, 0x305731e97514]),
};
pub const AFFINE_Y_GEN_B: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xe4786c67ba55ff3c, 0x6ffa02bcc2a148e0, 0xe1c5d019df326e2a, 0x232148910f712e87, 0x6ade324bee99c196, 0x4372f82c6bb821f3, 0x91a374a15d391ec4, 0x6e98998b110b7c75, 0x2e093f44d4eeb574, 0x33cdd14668840958, 0xb017cea89e353067, 0x6f907085d4b7]),
};

/// `x(P_A) = x([3^239](11,...))`, Alice's base public point on `E_0`.
/// Self-derived from [`AFFINE_X_GEN_A`]/[`AFFINE_Y_GEN_A`] via the same
/// x-only ladder implemented in `curve::ProjectivePrimeFieldPoint`, and
/// cross-checked against the curve equation -- see `DESIGN.md`.
pub const AFFINE_X_PA: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xd56fe52627914862, 0x1fad60dc96b5baea, 0x01e137d0bf07ab91, 0x404d3e9252161964, 0x3c5385e4cd09a337, 0x4476426769e4af73, 0x9790c6db989dfe33, 0xe06e1c04d2aa8b5e, 0x38c08185edea73b9, 0xaa41f678a4396ca6, 0x92b9259b2229e9a0, 0x2f9326818be0]),
};
pub const AFFINE_Y_PA: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xccd42e9041c288c6, 0x81a1df00dce61c24, 0x157a9dcb510427e4, 0x1fe9208292f8ed7c, 0x751bd86908c32cb0, 0x8b4b4bf75b88ba8a, 0x3ccffe93cd0ee411, 0x0091cd4069eb0e05, 0x2323488dbd901307, 0xaa9e95833ce44d01, 0x7adf1e9088d29204, 0x5c4be53b11a3]),
};

/// `x(P_B) = x([2^372](6,...))`, Bob's base public point on `E_0`.
pub const AFFINE_X_PB: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xf1a8c9ed7b96c4ab, 0x299429da5178486e, 0xef4926f20cd5c2f4, 0x683b2e2858b4716a, 0xdda2fbcc3cac3eeb, 0xec055f9f3a600460, 0xd5a5a17a58c3848b, 0x4652d836f42eaed5, 0x2f2e71ed78b3a3b3, 0xa771c057180add1d, 0xc780a5d2d835f512, 0x114ea3b55ac1]),
};
pub const AFFINE_Y_PB: PrimeFieldElement = PrimeFieldElement {
    A: Fp751Element([0xd1e1471273e3736b, 0xf9301ba94da241fe, 0xe14ab3c17fef0a85, 0xb4ddd26a037e9e62, 0x066142dfb2afeb69, 0xe297cb70649d6c9e, 0x214dfc6e8b1a0912, 0x9f5ba818b01cf859, 0x87d15b4907c12828, 0xa4da70c53a880dbf, 0xac5df62a72c8f253, 0x2e26a42ec617]),
};

/// Alice's isogeny-tree traversal strategy (optimal-strategy table for a
/// 2^372-isogeny chain of `MAX_ALICE` steps).
pub const MAX_ALICE: usize = 185;
pub const ALICE_ISOGENY_STRATEGY: [u8; MAX_ALICE] = [0, 1, 1, 2, 2, 2, 3, 4, 4, 4, 4, 5, 5,
        6, 7, 8, 8, 9, 9, 9, 9, 9, 9, 9, 12, 11, 12, 12, 13, 14, 15, 16, 16, 16, 16,
        16, 16, 17, 17, 18, 18, 17, 21, 17, 18, 21, 20, 21, 21, 21, 21, 21, 22, 25, 25,
        25, 26, 27, 28, 28, 29, 30, 31, 32, 32, 32, 32, 32, 32, 32, 33, 33, 33, 35, 36,
        36, 33, 36, 35, 36, 36, 35, 36, 36, 37, 38, 38, 39, 40, 41, 42, 38, 39, 40, 41,
        42, 40, 46, 42, 43, 46, 46, 46, 46, 48, 48, 48, 48, 49, 49, 48, 53, 54, 51, 52,
        53, 54, 55, 56, 57, 58, 59, 59, 60, 62, 62, 63, 64, 64, 64, 64, 64, 64, 64, 64,
        65, 65, 65, 65, 65, 66, 67, 65, 66, 67, 66, 69, 70, 66, 67, 66, 69, 70, 69, 70,
        70, 71, 72, 71, 72, 72, 74, 74, 75, 72, 72, 74, 74, 75, 72, 72, 74, 75, 75, 72,
        72, 74, 75, 75, 77, 77, 79, 80, 80, 82];

/// Bob's isogeny-tree traversal strategy (optimal-strategy table for a
/// 3^239-isogeny chain of `MAX_BOB` steps).
pub const MAX_BOB: usize = 239;
pub const BOB_ISOGENY_STRATEGY: [u8; MAX_BOB] = [0, 1, 1, 2, 2, 2, 3, 3, 4, 4, 4, 5, 5, 5, 6,
        7, 8, 8, 8, 8, 9, 9, 9, 9, 9, 10, 12, 12, 12, 12, 12, 12, 13, 14, 14, 15, 16,
        16, 16, 16, 16, 17, 16, 16, 17, 19, 19, 20, 21, 22, 22, 22, 22, 22, 22, 22, 22,
        22, 22, 24, 24, 25, 27, 27, 28, 28, 29, 28, 29, 28, 28, 28, 30, 28, 28, 28, 29,
        30, 33, 33, 33, 33, 34, 35, 37, 37, 37, 37, 38, 38, 37, 38, 38, 38, 38, 38, 39,
        43, 38, 38, 38, 38, 43, 40, 41, 42, 43, 48, 45, 46, 47, 47, 48, 49, 49, 49, 50,
        51, 50, 49, 49, 49, 49, 51, 49, 53, 50, 51, 50, 51, 51, 51, 52, 55, 55, 55, 56,
        56, 56, 56, 56, 58, 58, 61, 61, 61, 63, 63, 63, 64, 65, 65, 65, 65, 66, 66, 65,
        65, 66, 66, 66, 66, 66, 66, 66, 71, 66, 73, 66, 66, 71, 66, 73, 66, 66, 71, 66,
        73, 68, 68, 71, 71, 73, 73, 73, 75, 75, 78, 78, 78, 80, 80, 80, 81, 81, 82, 83,
        84, 85, 86, 86, 86, 86, 86, 87, 86, 88, 86, 86, 86, 86, 88, 86, 88, 86, 86, 86,
        88, 88, 86, 86, 86, 93, 90, 90, 92, 92, 92, 93, 93, 93, 93, 93, 97, 97, 97, 97,
        97, 97];
