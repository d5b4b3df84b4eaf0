use crate::geom::V2;
use crate::mat3::Mat3;
use tracing::{trace, warn};

/// Names of the six editable fields, in `[a, b, c, d, e, f]` order.
pub const SCALAR_NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

/// Text of the six fields for the identity matrix.
pub const IDENTITY_INPUTS: [&str; 6] = ["1", "0", "0", "1", "0", "0"];

/// Longest leading `[+-]digits[.digits][e[+-]digits]` run of `text`.
///
/// The mantissa needs at least one digit on either side of the dot. An exponent
/// without digits (`1e`, `2e-`) is left off.
fn numeric_prefix(text: &str) -> &str {
    let b = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut end = int_end;
    let mut n_digits = int_end - i;
    if end < b.len() && b[end] == b'.' {
        let frac_end = digits_from(end + 1);
        n_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if n_digits == 0 {
        return "";
    }

    if end < b.len() && (b[end] == b'e' || b[end] == b'E') {
        let mut j = end + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    &text[..end]
}

/// Parses one field of the matrix form.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so a
/// half-typed `1e` reads as 1 and `3abc` as 3. No prefix, or a non-finite
/// result (`NaN`, `inf`, `1e999`), counts as 0.
pub fn parse_scalar(text: &str) -> f64 {
    let text = text.trim_start();
    if text.is_empty() {
        return 0.0;
    }
    match numeric_prefix(text).parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!(input = text, "non-numeric matrix entry, using 0");
            0.0
        }
    }
}

/// The single mutable affine matrix behind the transformed pane.
#[derive(Debug, Clone, Default)]
pub struct MatrixModel {
    mat: Mat3,
}

impl MatrixModel {
    /// Starts at identity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_from_scalars(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        // Same coercion as the text path: NaN/inf can't come from a form field either.
        let fin = |v: f64| if v.is_finite() { v } else { 0.0 };
        self.mat = Mat3::from_affine2(fin(a), fin(b), fin(c), fin(d), fin(e), fin(f));
        trace!(mat = ?self.mat.affine2(), "matrix rebuilt");
    }

    /// Rebuilds the whole matrix from the raw text of the six fields.
    pub fn set_from_inputs<S: AsRef<str>>(&mut self, inputs: &[S; 6]) {
        let [a, b, c, d, e, f] = [0, 1, 2, 3, 4, 5].map(|i| parse_scalar(inputs[i].as_ref()));
        self.set_from_scalars(a, b, c, d, e, f);
    }

    #[inline]
    pub fn transform(&self, p: V2) -> V2 {
        self.mat.transform(p)
    }

    pub fn current(&self) -> Mat3 {
        self.mat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::v2;

    #[test]
    fn starts_at_identity() {
        let model = MatrixModel::new();
        assert_eq!(model.current(), Mat3::identity());
        assert_eq!(model.transform(v2(3.5, -2.0)), v2(3.5, -2.0));
    }

    #[test]
    fn parse_scalar_coerces_garbage_to_zero() {
        assert_eq!(parse_scalar(""), 0.0);
        assert_eq!(parse_scalar("   "), 0.0);
        assert_eq!(parse_scalar("abc"), 0.0);
        assert_eq!(parse_scalar("NaN"), 0.0);
        assert_eq!(parse_scalar("inf"), 0.0);
        assert_eq!(parse_scalar(" 2.5 "), 2.5);
        assert_eq!(parse_scalar("-1e1"), -10.0);
        assert_eq!(parse_scalar("1e999"), 0.0);
        assert_eq!(parse_scalar("."), 0.0);
        assert_eq!(parse_scalar("-"), 0.0);
    }

    #[test]
    fn parse_scalar_uses_numeric_prefix() {
        assert_eq!(parse_scalar("3abc"), 3.0);
        assert_eq!(parse_scalar("1e"), 1.0);
        assert_eq!(parse_scalar("2e-"), 2.0);
        assert_eq!(parse_scalar(" -2.5px"), -2.5);
        assert_eq!(parse_scalar(".5"), 0.5);
        assert_eq!(parse_scalar("5."), 5.0);
        assert_eq!(parse_scalar("+4e2x"), 400.0);
        assert_eq!(parse_scalar("1.5.5"), 1.5);
    }

    #[test]
    fn half_typed_fields_keep_their_prefix() {
        let mut model = MatrixModel::new();
        model.set_from_inputs(&["3abc", "0", "0", "1e", "0", "0"]);
        assert_eq!(model.current().affine2(), [3.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_field_equals_zero_field() {
        let mut with_empty = MatrixModel::new();
        with_empty.set_from_inputs(&["2", "", "0", "x", "1", ""]);
        let mut with_zero = MatrixModel::new();
        with_zero.set_from_inputs(&["2", "0", "0", "0", "1", "0"]);
        assert_eq!(with_empty.current(), with_zero.current());
    }

    #[test]
    fn inputs_map_to_affine_order() {
        let mut model = MatrixModel::new();
        model.set_from_inputs(&["1", "2", "3", "4", "5", "6"]);
        assert_eq!(model.current().affine2(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        // x' = 1*1 + 3*1 + 5, y' = 2*1 + 4*1 + 6
        assert_eq!(model.transform(v2(1.0, 1.0)), v2(9.0, 12.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let mut model = MatrixModel::new();
        model.set_from_scalars(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
        assert_eq!(model.transform(v2(1.0, 0.0)), v2(0.0, 1.0));
        assert_eq!(model.transform(v2(0.0, 1.0)), v2(-1.0, 0.0));
    }

    #[test]
    fn each_edit_overwrites_whole_matrix() {
        let mut model = MatrixModel::new();
        model.set_from_scalars(2.0, 0.0, 0.0, 2.0, 7.0, 7.0);
        model.set_from_inputs(&IDENTITY_INPUTS);
        assert_eq!(model.current(), Mat3::identity());
    }

    #[test]
    fn singular_matrix_is_accepted() {
        let mut model = MatrixModel::new();
        model.set_from_scalars(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(model.transform(v2(4.0, -4.0)), v2(0.0, 0.0));
        model.set_from_scalars(f64::NAN, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(model.current().affine2()[0], 0.0);
    }
}
