use crate::geom::{V2, v2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    // Row-major 3x3 matrix. The last row is always (0, 0, 1).
    m: [[f64; 3]; 3],
}

impl Mat3 {
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Constructs a homogeneous 3x3 matrix from a 2D affine transform.
    ///
    /// The expected 6-element layout is `[a, b, c, d, e, f]` such that:
    ///
    /// - `x' = a*x + c*y + e`
    /// - `y' = b*x + d*y + f`
    pub const fn from_affine2(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            m: [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]],
        }
    }

    /// Parses a flat `[a, b, c, d, e, f]` slice into a `Mat3`.
    ///
    /// Returns `None` if there are fewer than 6 elements.
    pub fn from_slice(mat: &[f64]) -> Option<Self> {
        if mat.len() < 6 {
            return None;
        }
        Some(Self::from_affine2(mat[0], mat[1], mat[2], mat[3], mat[4], mat[5]))
    }

    /// The six free entries in `[a, b, c, d, e, f]` order.
    pub fn affine2(&self) -> [f64; 6] {
        [
            self.m[0][0],
            self.m[1][0],
            self.m[0][1],
            self.m[1][1],
            self.m[0][2],
            self.m[1][2],
        ]
    }

    /// Applies this transform to a 2D point (implicitly using homogeneous `w=1`).
    #[inline]
    pub fn transform_point2(&self, x: f64, y: f64) -> (f64, f64) {
        let x2 = self.m[0][0] * x + self.m[0][1] * y + self.m[0][2];
        let y2 = self.m[1][0] * x + self.m[1][1] * y + self.m[1][2];
        (x2, y2)
    }

    #[inline]
    pub fn transform(&self, p: V2) -> V2 {
        let (x, y) = self.transform_point2(p.x, p.y);
        v2(x, y)
    }

    /// Returns a transform that applies this matrix, then translates by `(tx, ty)`.
    ///
    /// This is equivalent to left-multiplying by a translation matrix `T(tx, ty)`.
    #[inline]
    pub fn then_translate(self, tx: f64, ty: f64) -> Self {
        let mut out = self;
        out.m[0][2] += tx;
        out.m[1][2] += ty;
        out
    }

    /// Determinant of the linear part. This is the signed area of the transformed unit square.
    pub fn det(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}
