#![allow(dead_code)]
#![allow(non_snake_case)]
#![allow(unused_assignments)]
#![cfg_attr(all(test, feature = "bench"), feature(test))]

//! Constant-time projective Montgomery-curve and isogeny arithmetic for
//! the SIDH/SIKE family of supersingular-isogeny key encapsulation
//! schemes.
//!
//! This crate implements the arithmetic *core* only: x-only point
//! doubling/tripling/ladders, 2/3/4-isogeny construction and evaluation
//! (including the "dual" variants used by key compression), and the
//! small set of recovery/utility routines (`inv_3_way`, `get_A`, `j_inv`,
//! `CompletePoint`/`CompleteMPoint`). Field arithmetic over GF(p) and
//! GF(p^2) is implemented in [`field`] in plain Montgomery-form Rust.
//! The full SIDH protocol shell (key generation, encapsulation/
//! decapsulation, wire encoding) is out of scope; [`sidh`] keeps a thin
//! harness over the core, grounded in the reference implementation this
//! crate descends from, purely to give the arithmetic something
//! end-to-end to be tested against.

extern crate core;

// Used for traits related to constant-time code.
extern crate subtle;

#[cfg(test)]
extern crate quickcheck;

#[cfg(all(test, feature = "bench"))]
extern crate test;

extern crate rand;
extern crate rand_core;

pub mod constants;
pub mod error;
pub mod field;
pub mod curve;
pub mod isogeny;
pub mod sidh;

pub use error::CoreError;
