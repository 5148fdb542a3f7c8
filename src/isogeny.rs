use ::field::{Fp751Element, ExtensionFieldElement};
use ::curve::{ProjectiveCurveParameters, ProjectivePoint};

#[cfg(test)]
use quickcheck::QuickCheck;

// Represents a 3-isogeny phi, holding the data necessary to evaluate phi.
#[derive(Copy, Clone)]
pub struct ThreeIsogeny {
    pub X: ExtensionFieldElement,
    pub Z: ExtensionFieldElement,
}

impl ThreeIsogeny {
    // Given a three-torsion point x3 = x(P_3) on the curve E_(A:C), construct the
    // three-isogeny phi : E_(A:C) -> E_(A:C)/<P_3> = E_(A':C').
    //
    // Returns a tuple (codomain, isogeny) = (E_(A':C'), phi).
    fn compute_three_isogeny(x3: &ProjectivePoint) -> (ProjectiveCurveParameters, ThreeIsogeny) {
        let isogeny = ThreeIsogeny{ X: x3.X, Z: x3.Z };
        // We want to compute
	    // (A':C') = (Z^4 + 18X^2Z^2 - 27X^4 : 4XZ^3)
	    // To do this, use the identity 18X^2Z^2 - 27X^4 = 9X^2(2Z^2 - 3X^2)
        let mut v1 = x3.X.square();      // = X^2
        let mut v0 = &(&v1 + &v1) + &v1; // = 3X^2
        v1 = &(&v0 + &v0) + &v0;         // = 9X^2
        let mut v2 = x3.Z.square();      // = Z^2
        let v3 = v2.square();            // = Z^4
        v2 = &v2 + &v2;                  // = 2Z^2
        v0 = &v2 - &v0;                  // = 2Z^2 - 3X^2
        v1 = &v1 * &v0;                  // = 9X^2(2Z^2 - 3X^2)
        v0 = &x3.X * &x3.Z;              // = XZ
        v0 = &v0 + &v0;                  // = 2XZ
        let a = &v3 + &v1;               // = Z^4 + 9X^2(2Z^2 - 3X^2)
        let c = &v0 * &v2;               // = 4XZ^3
        let codomain = ProjectiveCurveParameters{ A: a, C: c };

        (codomain, isogeny)
    }
    // Given a 3-isogeny phi and a point xP = x(P), compute x(Q), the x-coordinate
    // of the image Q = phi(P) of P under phi : E_(A:C) -> E_(A':C').
    //
    // The output xQ = x(Q) is then a point on the curve E_(A':C'); the curve
    // parameters are returned by the compute_three_isogeny function used to construct
    // phi.
    fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let phi = *self;
        let mut t0 = &phi.X * &xP.X; // = X3*XP
        let mut t1 = &phi.Z * &xP.Z; // = Z3*XP
        let mut t2 = &t0 - &t1;      // = X3*XP - Z3*ZP
        t0 = &phi.Z * &xP.X;         // = Z3*XP
        t1 = &phi.X * &xP.Z;         // = X3*ZP
        t0 = &t0 - &t1;              // = Z3*XP - X3*ZP
        t2 = t2.square();            // = (X3*XP - Z3*ZP)^2
        t0 = t0.square();            // = (Z3*XP - X3*ZP)^2
        let x = &t2 * &xP.X;         // = XP*(X3*XP - Z3*ZP)^2
        let z = &t0 * &xP.Z;         // = ZP*(Z3*XP - X3*ZP)^2
        let xQ = ProjectivePoint{ X: x, Z: z };

        xQ
    }
}

// Represents a 4-isogeny phi, holding the data necessary to evaluate phi.
//
// See compute_four_isogeny for more details.
#[derive(Copy, Clone)]
pub struct FourIsogeny {
    pub Xsq_plus_Zsq : ExtensionFieldElement,
    pub Xsq_minus_Zsq: ExtensionFieldElement,
    pub XZ2          : ExtensionFieldElement,
    pub Xpow4        : ExtensionFieldElement,
    pub Zpow4        : ExtensionFieldElement,
}

impl FourIsogeny {
    // Given a four-torsion point x4 = x(P_4) on the curve E_(A:C), compute the
    // coefficients of the codomain E_(A':C') of the four-isogeny phi : E_(A:C) ->
    // E_(A:C)/<P_4>.
    //
    // Returns a tuple (codomain, isogeny) = (E_(A':C') : phi).
    //
    // There are two sets of formulas in Costello-Longa-Naehrig for computing
    // four-isogenies. One set is for the case where (1,...) lies in the kernel of
    // the isogeny (this is the FirstFourIsogeny), and the other (this set) is for
    // the case that (1,...) is *not* in the kernel.
    fn compute_four_isogeny(x4: &ProjectivePoint) -> (ProjectiveCurveParameters, FourIsogeny) {
        let mut v0 = x4.X.square();    // = X4^2
        let v1 = x4.Z.square();        // = Z4^2
        let Xsq_plus_Zsq = &v0 + &v1;  // = X4^2 + Z4^2
        let Xsq_minus_Zsq = &v0 - &v1; // = X4^2 - Z4^2
        let mut XZ2 = &x4.X + &x4.Z;   // = X4 + Z4
        XZ2 = XZ2.square();            // = X4^2 + Z4^2 + 2X4Z4
        XZ2 = &XZ2 - &Xsq_plus_Zsq;    // = 2X4Z4
        let Xpow4 = v0.square();       // = X4^4
        let Zpow4 = v1.square();       // = Z4^4
        v0 = &Xpow4 + &Xpow4;          // = 2X4^4
        v0 = &v0 - &Zpow4;             // = 2X4^4 - Z4^4
        let a = &v0 + &v0;             // = 2(2X4^4 - Z4^4)
        let c = Zpow4;                 // = Z4^4

        let codomain = ProjectiveCurveParameters{ A: a, C: c };
        let isogeny = FourIsogeny{
            Xsq_plus_Zsq,
            Xsq_minus_Zsq,
            XZ2,
            Xpow4,
            Zpow4
        };

        (codomain, isogeny)
    }
    // Given a 4-isogeny phi and a point xP = x(P), compute x(Q), the x-coordinate
    // of the image Q = phi(P) of P under phi : E_(A:C) -> E_(A':C').
    //
    // The output xQ = x(Q) is then a point on the curve E_(A':C'); the curve
    // parameters are returned by the compute_four_isogeny function used to construct
    // phi.
    fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let phi = *self;
        // We want to compute formula (7) of Costello-Longa-Naehrig, namely
        //
        // Xprime = (2*X_4*Z*Z_4 - (X_4^2 + Z_4^2)*X)*(X*X_4 - Z*Z_4)^2*X
        // Zprime = (2*X*X_4*Z_4 - (X_4^2 + Z_4^2)*Z)*(X_4*Z - X*Z_4)^2*Z
        //
        // To do this we adapt the method in the MSR implementation, which computes
        //
        // X_Q = Xprime*( 16*(X_4 + Z_4)*(X_4 - Z_4)*X_4^2*Z_4^4 )
        // Z_Q = Zprime*( 16*(X_4 + Z_4)*(X_4 - Z_4)*X_4^2*Z_4^4 )
        //
        let mut t0 = &xP.X * &phi.XZ2;          // = 2*X*X_4*Z_4
        let mut t1 = &xP.Z * &phi.Xsq_plus_Zsq; // = (X_4^2 + Z_4^2)*Z
        t0 = &t0 - &t1;                         // = -X_4^2*Z + 2*X*X_4*Z_4 - Z*Z_4^2
        t1 = &xP.Z * &phi.Xsq_minus_Zsq;        // = (X_4^2 - Z_4^2)*Z
        let mut t2 = (&t0 - &t1).square();      // = 4*(X_4*Z - X*Z_4)^2*X_4^2
        t0 = &t0 * &t1;
        t0 = &t0 + &t0;
        t0 = &t0 + &t0;                         // = 4*(2*X*X_4*Z_4 - (X_4^2 + Z_4^2)*Z)*(X_4^2 - Z_4^2)*Z
        t1 = &t0 + &t2;                         // = 4*(X*X_4 - Z*Z_4)^2*Z_4^2
        t0 = &t0 * &t2;                         // = Zprime * 16*(X_4 + Z_4)*(X_4 - Z_4)*X_4^2
        let z = &t0 * &phi.Zpow4;               // = Zprime * 16*(X_4 + Z_4)*(X_4 - Z_4)*X_4^2*Z_4^4
        t2 = &t2 * &phi.Zpow4;                  // = 4*(X_4*Z - X*Z_4)^2*X_4^2*Z_4^4
        t0 = &t1 * &phi.Xpow4;                  // = 4*(X*X_4 - Z*Z_4)^2*X_4^4*Z_4^2
        t0 = &t2 - &t0;                         // = -4*(X*X_4^2 - 2*X_4*Z*Z_4 + X*Z_4^2)*X*(X_4^2 - Z_4^2)*X_4^2*Z_4^2
        let x = &t1 * &t0;                      // = Xprime * 16*(X_4 + Z_4)*(X_4 - Z_4)*X_4^2*Z_4^4
        let xQ = ProjectivePoint{ X: x, Z: z };

        xQ
    }
}

// Represents a 4-isogeny phi. See compute_four_isogeny for details.
#[derive(Copy, Clone)]
pub struct FirstFourIsogeny {
    pub A: ExtensionFieldElement,
    pub C: ExtensionFieldElement,
}

impl FirstFourIsogeny {
    // Compute the "first" four-isogeny from the given curve. See also
    // compute_four_isogeny and Costello-Longa-Naehrig for more details.
    fn compute_first_four_isogeny(domain: &ProjectiveCurveParameters) -> (ProjectiveCurveParameters, FirstFourIsogeny) {
        let mut t0 = &domain.C + &domain.C; // = 2*C
        let c = &domain.A - &t0;            // = A - 2*C
        let mut t1 = &t0 + &t0;             // = 4*C
        t1 = &t1 + &t0;                     // = 6*C
        t0 = &t1 + &domain.A;               // = A + 6*C
        let a = &t0 + &t0;                  // = 2*(A + 6*C)
        
        let codomain = ProjectiveCurveParameters{ A: a, C: c };
        let isogeny = FirstFourIsogeny{ A: domain.A, C: domain.C };

        (codomain, isogeny)
    }
    // Given a 4-isogeny phi and a point xP = x(P), compute x(Q), the x-coordinate
    // of the image Q = phi(P) of P under phi : E_(A:C) -> E_(A':C').
    //
    // The output xQ = x(Q) is then a point on the curve E_(A':C'); the curve
    // parameters are returned by the compute_first_four_isogeny function used to 
    // construct phi.
        fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let phi = *self;
        let mut t0 = (&xP.X + &xP.Z).square(); // = (X+Z)^2
        let t2 = &xP.X * &xP.Z;                // = X*Z
        let mut t1 = &t2 + &t2;                // = 2*X*Z
        t1 = &t0 - &t1;                        // = X^2 + Z^2
        let mut x = &phi.A * &t2;              // = A*X*Z
        let t3 = &phi.C * &t1;                 // = C*(X^2 + Z^2)
        x = &x + &t3;                          // = A*X*Z + C*(X^2 + Z^2)
        x = &x * &t0;                          // = (X+Z)^2 * (A*X*Z + C*(X^2 + Z^2))
        t0 = (&xP.X - &xP.Z).square();         // = (X-Z)^2
        t0 = &t0 * &t2;                        // = X*Z*(X-Z)^2
        t1 = &phi.C + &phi.C;                  // = 2*C
        t1 = &t1 - &phi.A;                     // = 2*C - A
        let z = &t1 * &t0;                     // = (2*C - A)*X*Z*(X-Z)^2
        let xQ = ProjectivePoint{ X: x, Z: z };

        xQ
    }
}

// Represents a 2-isogeny phi, holding the data (the kernel point) necessary
// to evaluate phi.
#[derive(Copy, Clone)]
pub struct TwoIsogeny {
    pub X: ExtensionFieldElement,
    pub Z: ExtensionFieldElement,
}

impl TwoIsogeny {
    // Given a two-torsion point x2 = x(P_2) on the curve E_(A:C), construct the
    // two-isogeny phi : E_(A:C) -> E_(A:C)/<P_2> = E_(A':C').
    //
    // Returns a tuple (codomain, isogeny) = (E_(A':C'), phi).
    pub fn compute_two_isogeny(x2: &ProjectivePoint) -> (ProjectiveCurveParameters, TwoIsogeny) {
        let isogeny = TwoIsogeny{ X: x2.X, Z: x2.Z };
        let a = x2.X.square();        // = X2^2
        let c = x2.Z.square();        // = Z2^2
        let a = &c - &a;              // = Z2^2 - X2^2
        let codomain = ProjectiveCurveParameters{ A: a, C: c };

        (codomain, isogeny)
    }
    // Given a 2-isogeny phi and a point xP = x(P), compute x(Q), the x-coordinate
    // of the image Q = phi(P) of P under phi : E_(A:C) -> E_(A':C').
    pub fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let phi = *self;
        let t0 = &phi.X + &phi.Z;        // = X2+Z2
        let t1 = &phi.X - &phi.Z;        // = X2-Z2
        let t2 = &xP.X + &xP.Z;          // = X+Z
        let t3 = &xP.X - &xP.Z;          // = X-Z
        let t0 = &t0 * &t3;              // = (X2+Z2)*(X-Z)
        let t1 = &t1 * &t2;              // = (X2-Z2)*(X+Z)
        let t2 = &t0 + &t1;              // = (X2+Z2)*(X-Z) + (X2-Z2)*(X+Z)
        let t3 = &t0 - &t1;              // = (X2+Z2)*(X-Z) - (X2-Z2)*(X+Z)
        let x = &xP.X * &t2;
        let z = &xP.Z * &t3;

        ProjectivePoint{ X: x, Z: z }
    }
}

// The following free functions implement the "dual" 4- and 2-isogeny
// primitives used by key compression: instead of dividing the domain curve
// by the kernel point as the isogenies above do, they push a point forward
// along the isogeny in the *other* direction, from the codomain back
// towards the domain, which is what compression's basis-decomposition walk
// needs. They are standalone (not bundled in a struct) because, unlike
// ThreeIsogeny/FourIsogeny/TwoIsogeny, the caller supplies the per-level
// coefficients explicitly rather than constructing them from a single
// kernel point.

// Given a 4-torsion point p4 = (X4:Z4), compute the codomain coefficients
// (A24, C24) of the dual 4-isogeny together with the 5-element coefficient
// table consumed by eval_dual_4_isog/eval_full_dual_4_isog. coeff[1] and
// coeff[2] are the values eval_dual_4_isog needs from *this* level; coeff[3]
// and coeff[4] are scratch (X4^2 and Z4^2) kept only so callers building a
// per-level table have them on hand; coeff[0] is unused by eval_dual_4_isog
// directly but mirrors the reference layout.
pub fn get_4_isog_dual(p4: &ProjectivePoint) -> (ExtensionFieldElement, ExtensionFieldElement, [ExtensionFieldElement; 5]) {
    let mut coeff = [ExtensionFieldElement::zero(); 5];
    coeff[1] = &p4.X - &p4.Z;             // = X4-Z4
    coeff[2] = &p4.X + &p4.Z;             // = X4+Z4
    coeff[4] = p4.Z.square();             // = Z4^2
    coeff[0] = &coeff[4] + &coeff[4];     // = 2*Z4^2
    let c24 = coeff[0].square();          // = 4*Z4^4
    coeff[0] = &coeff[0] + &coeff[0];     // = 4*Z4^2
    coeff[3] = p4.X.square();             // = X4^2
    let mut a24 = &coeff[3] + &coeff[3];  // = 2*X4^2
    a24 = a24.square();                   // = 4*X4^4

    (a24, c24, coeff)
}

// Shared sub-computation of eval_dual_4_isog, split out because the
// reference keeps it in a standalone function reused at every level of the
// dual 4-isogeny walk: given x4_plus_z4 = X4+Z4 and the squares x4sq = X4^2,
// z4sq = Z4^2, produce the 3-element coefficient table eval_dual_4_isog
// expects.
pub fn eval_dual_4_isog_shared(x4_plus_z4: &ExtensionFieldElement, x4sq: &ExtensionFieldElement,
                                z4sq: &ExtensionFieldElement) -> [ExtensionFieldElement; 3]
{
    let c0 = x4sq - z4sq;                 // = X4^2 - Z4^2
    let c1 = x4sq + z4sq;                 // = X4^2 + Z4^2
    let c2 = &x4_plus_z4.square() - &c1;  // = (X4+Z4)^2 - (X4^2+Z4^2) = 2*X4*Z4

    [c0, c1, c2]
}

// Evaluate the dual 4-isogeny defined by (a24, c24, coeff) at the point p,
// in place. Mirrors the reference's in-place style; coeff is the 3-element
// table produced by eval_dual_4_isog_shared at this level.
pub fn eval_dual_4_isog(a24: &ExtensionFieldElement, c24: &ExtensionFieldElement,
                         coeff: &[ExtensionFieldElement; 3], p: &mut ProjectivePoint)
{
    let s2 = (&p.X + &p.Z).square();      // = (X+Z)^2
    let d2 = (&p.X - &p.Z).square();      // = (X-Z)^2
    let four_xz = &s2 - &d2;              // = 4*X*Z
    let c_minus_a = c24 - a24;            // = C24 - A24
    let w = &four_xz * &c_minus_a;        // = 4*X*Z*(C24-A24)
    let u = c24 * &s2;                    // = C24*(X+Z)^2
    let u = &u - &w;                      // = C24*(X+Z)^2 - 4*X*Z*(C24-A24)

    let new_x_pre = &u * &s2;
    let new_z_pre = &w * &d2;

    let mut x = &coeff[0] * &new_x_pre;
    let tmp = &coeff[1] * &new_z_pre;
    x = &x + &tmp;
    let z = &coeff[2] * &new_z_pre;

    p.X = x;
    p.Z = z;
}

// Evaluate the dual 2-isogeny defined by the kernel-derived pair (x2, z2)
// at the point p, in place. Only exercised by parameter sets where the
// Alice-side exponent OALICE_BITS is odd, since then the 2^e-isogeny walk
// has a final degree-2 step in addition to its degree-4 steps; kept here
// as a general building block regardless.
pub fn eval_dual_2_isog(x2: &ExtensionFieldElement, z2: &ExtensionFieldElement, p: &mut ProjectivePoint) {
    let t0 = (&p.X + &p.Z).square();    // = (X+Z)^2
    let t1 = (&p.X - &p.Z).square();    // = (X-Z)^2
    let diff = &t0 - &t1;                // = 4*X*Z
    let x = z2 * &t0;                    // = Z2*(X+Z)^2
    let z = x2 * &diff;                  // = X2*4*X*Z

    p.X = x;
    p.Z = z;
}

// The final step of the dual 2^e-isogeny walk: folds in the degenerate
// last 2-isogeny (whose kernel is the curve's own 2-torsion point (1:0))
// by squaring and then transposing-and-negating the real/imaginary
// components, rather than by calling eval_dual_2_isog with an explicit
// kernel point.
pub fn eval_final_dual_2_isog(p: &mut ProjectivePoint) {
    let t0 = &p.X + &p.Z;       // = X+Z
    let t1 = &p.X * &p.Z;       // = X*Z
    let mut x = t0.square();    // = (X+Z)^2
    // Transpose real/imaginary parts and negate the new imaginary part.
    x = ExtensionFieldElement{ A: x.B, B: -(&x.A) };
    let mut z = &t1 + &t1;      // = 2*X*Z
    z = &z + &z;                // = 4*X*Z

    p.X = x;
    p.Z = z;
}

// Push the point p backward through the full dual 2^e-isogeny, using the
// per-level (A24, C24, coeff) table `as_table` built while walking the
// forward isogeny (as_table[i] corresponds to the i-th 4-isogeny step, with
// as_table[i][2..5] holding the coeff triple consumed when evaluating the
// isogeny one level below). `max_alice` is the number of 4-isogeny steps in
// the table (MAX_ALICE for SIKEp751); when OALICE_BITS is odd there is one
// further degree-2 step before the final fold.
pub fn eval_full_dual_4_isog(as_table: &[[ExtensionFieldElement; 5]], max_alice: usize,
                             oalice_bits_odd: bool, p: &mut ProjectivePoint)
{
    for i in 0..max_alice {
        let row = max_alice - i;
        let coeff = [
            as_table[row - 1][2].clone(),
            as_table[row - 1][3].clone(),
            as_table[row - 1][4].clone(),
        ];
        eval_dual_4_isog(&as_table[row][0], &as_table[row][1], &coeff, p);
    }
    if oalice_bits_odd {
        eval_dual_2_isog(&as_table[max_alice][2], &as_table[max_alice][3], p);
    }
    eval_final_dual_2_isog(p);
}
