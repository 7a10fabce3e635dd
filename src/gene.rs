//! # Genes
//!
//! Chromosomes are sequences of genes of any ordered type. The [`Gene`] trait is
//! the capability bound every chromosome element must satisfy; it is blanket
//! implemented, so integers, floats, strings, chars and user types with a
//! `PartialOrd` implementation all qualify without further work.
//!
//! [`ToFitness`] is the optional conversion a gene needs to be scored by the
//! reference [`SumFitnessEvaluator`](crate::fitness::SumFitnessEvaluator).
//! Numeric genes convert directly; textual genes are parsed as decimal or
//! scientific-notation floats.
//!
//! ```rust
//! use evolvr::gene::ToFitness;
//!
//! assert_eq!(7u8.to_fitness().unwrap(), 7.0);
//! assert_eq!("2.5e1".to_fitness().unwrap(), 25.0);
//! assert!(String::from("seven").to_fitness().is_err());
//! ```

use std::fmt::Debug;
use std::num::ParseFloatError;

use thiserror::Error;

/// Capability bound for chromosome elements.
///
/// Genes must be cloneable (offspring are built from copies), comparable, and
/// shareable across the worker threads that evaluate and mutate individuals.
pub trait Gene: Clone + Debug + PartialOrd + Send + Sync + 'static {}

impl<T> Gene for T where T: Clone + Debug + PartialOrd + Send + Sync + 'static {}

/// A gene value that could not be read as a float.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {value:?} to f64")]
pub struct ConversionError {
    value: String,
    #[source]
    source: ParseFloatError,
}

impl ConversionError {
    /// The textual value that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Conversion of a gene into the `f64` domain fitness is computed in.
pub trait ToFitness {
    fn to_fitness(&self) -> Result<f64, ConversionError>;
}

macro_rules! numeric_to_fitness {
    ($($t:ty),* $(,)?) => {
        $(
            impl ToFitness for $t {
                #[inline]
                fn to_fitness(&self) -> Result<f64, ConversionError> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

numeric_to_fitness!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl ToFitness for str {
    fn to_fitness(&self) -> Result<f64, ConversionError> {
        self.parse::<f64>().map_err(|source| ConversionError {
            value: self.to_string(),
            source,
        })
    }
}

impl ToFitness for String {
    fn to_fitness(&self) -> Result<f64, ConversionError> {
        self.as_str().to_fitness()
    }
}

impl ToFitness for char {
    fn to_fitness(&self) -> Result<f64, ConversionError> {
        let mut buf = [0u8; 4];
        self.encode_utf8(&mut buf).to_fitness()
    }
}

impl<T: ToFitness + ?Sized> ToFitness for &T {
    fn to_fitness(&self) -> Result<f64, ConversionError> {
        (**self).to_fitness()
    }
}
