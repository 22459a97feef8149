//! The possible values for a single atom of a chromosome
use std::hash::{Hash, Hasher};

/// Standard Allele, the atom type of a chromosome. Implemented for the primitives the built-in
/// genotypes use (bool, signed integers, f64, char).
pub trait Allele: Clone + Copy + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Hash a slice of alleles. This method allows type-specific hashing behavior.
    /// For float types this hashes the bytes for deterministic results.
    fn hash_slice(slice: &[Self], hasher: &mut impl Hasher)
    where
        Self: Sized;

    /// Approximate equality, used by the tabu ring comparisons. Exact for discrete types, within
    /// epsilon for floats.
    fn approx_eq(a: Self, b: Self, _epsilon: f64) -> bool {
        a == b
    }
}

/// Macro for implementing Allele with default hash_slice.
/// Use this for any type that implements Hash and needs the standard hashing behavior.
#[macro_export]
macro_rules! impl_allele {
    ($($t:ty),*) => {
        $(
            impl $crate::allele::Allele for $t {
                fn hash_slice(slice: &[Self], hasher: &mut impl ::std::hash::Hasher) {
                    ::std::hash::Hash::hash(slice, hasher);
                }
            }
        )*
    }
}

impl_allele!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Allele for f64 {
    fn hash_slice(slice: &[Self], hasher: &mut impl Hasher) {
        let bytes: &[u8] = bytemuck::cast_slice(slice);
        bytes.hash(hasher);
    }

    fn approx_eq(a: Self, b: Self, epsilon: f64) -> bool {
        (a - b).abs() <= epsilon
    }
}

impl Allele for f32 {
    fn hash_slice(slice: &[Self], hasher: &mut impl Hasher) {
        let bytes: &[u8] = bytemuck::cast_slice(slice);
        bytes.hash(hasher);
    }

    fn approx_eq(a: Self, b: Self, epsilon: f64) -> bool {
        (a - b).abs() as f64 <= epsilon
    }
}
