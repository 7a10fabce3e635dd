//! # Error Types
//!
//! This module defines the error type shared by every part of the engine. Operators
//! and pipeline stages wrap the error that caused them to fail instead of replacing
//! it, so a caller can always ask what went wrong underneath a stage failure.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evolvr::error::{GeneticError, Result};
//!
//! fn some_function() -> Result<()> {
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! Testing for an underlying cause through stage wrappers:
//!
//! ```rust
//! use evolvr::error::GeneticError;
//!
//! let err = GeneticError::selection(
//!     "cannot perform selection on empty population",
//!     GeneticError::EmptyPopulation,
//! );
//!
//! assert!(err.is_empty_population());
//! assert!(!err.is_cancelled());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use evolvr::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> evolvr::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use std::fmt;
use thiserror::Error;

use crate::cancellation::CancelReason;
use crate::gene::ConversionError;

/// Represents errors that can occur in the genetic algorithm engine.
///
/// The variants fall into a small number of kinds: configuration mistakes made
/// once at setup, an empty population, an invalid chromosome, cancellation, and
/// stage-specific wrappers that carry one of those as their source.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A chromosome has the wrong length, is too short for an operation, or holds
    /// a gene that cannot be interpreted.
    #[error("Invalid chromosome: {message}")]
    InvalidChromosome {
        message: String,
        #[source]
        source: Option<ConversionError>,
    },

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness evaluation error: {message}")]
    FitnessEvaluation {
        message: String,
        #[source]
        source: Option<Box<GeneticError>>,
    },

    /// Error that occurs when a mutation fails.
    #[error("Mutation error: {message}")]
    Mutation {
        message: String,
        #[source]
        source: Option<Box<GeneticError>>,
    },

    /// Error that occurs when a selection fails.
    #[error("Selection error: {message}")]
    Selection {
        message: String,
        #[source]
        source: Option<Box<GeneticError>>,
    },

    /// Error that occurs when a crossover fails.
    #[error("Crossover error: {message}")]
    Crossover {
        message: String,
        #[source]
        source: Option<Box<GeneticError>>,
    },

    /// Cooperative cancellation was observed, either explicitly or through an
    /// expired deadline.
    #[error("Operation cancelled: {0}")]
    Cancelled(CancelReason),

    /// A pipeline stage failed during the generation loop.
    #[error("Generation {generation} failed during {stage}")]
    Generation {
        generation: usize,
        stage: Stage,
        #[source]
        source: Box<GeneticError>,
    },
}

/// The pipeline stage a [`GeneticError::Generation`] failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RefreshFitness,
    BestFitness,
    Selection,
    Crossover,
    Mutation,
    /// The fitness refresh that runs once after the last generation.
    FinalRefresh,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RefreshFitness => "fitness refresh",
            Stage::BestFitness => "best fitness lookup",
            Stage::Selection => "selection",
            Stage::Crossover => "crossover",
            Stage::Mutation => "mutation",
            Stage::FinalRefresh => "final fitness refresh",
        };
        f.write_str(name)
    }
}

impl GeneticError {
    /// Creates an [`GeneticError::InvalidChromosome`] without an underlying cause.
    pub fn invalid_chromosome(message: impl Into<String>) -> Self {
        GeneticError::InvalidChromosome {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps `source` as a fitness evaluation failure.
    pub fn fitness_evaluation(message: impl Into<String>, source: GeneticError) -> Self {
        GeneticError::FitnessEvaluation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps `source` as a mutation failure.
    pub fn mutation(message: impl Into<String>, source: GeneticError) -> Self {
        GeneticError::Mutation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps `source` as a selection failure.
    pub fn selection(message: impl Into<String>, source: GeneticError) -> Self {
        GeneticError::Selection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps `source` as a crossover failure.
    pub fn crossover(message: impl Into<String>, source: GeneticError) -> Self {
        GeneticError::Crossover {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error wrapped by this one, if it is itself a `GeneticError`.
    pub fn inner(&self) -> Option<&GeneticError> {
        match self {
            GeneticError::FitnessEvaluation { source, .. }
            | GeneticError::Mutation { source, .. }
            | GeneticError::Selection { source, .. }
            | GeneticError::Crossover { source, .. } => source.as_deref(),
            GeneticError::Generation { source, .. } => Some(&**source),
            _ => None,
        }
    }

    /// Iterates over this error followed by every `GeneticError` it wraps,
    /// outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &GeneticError> {
        std::iter::successors(Some(self), |err| (*err).inner())
    }

    /// Returns the innermost `GeneticError` of the chain.
    pub fn root_cause(&self) -> &GeneticError {
        self.chain().last().unwrap_or(self)
    }

    /// Returns `true` if cancellation caused this error, at any depth.
    pub fn is_cancelled(&self) -> bool {
        self.chain()
            .any(|err| matches!(err, GeneticError::Cancelled(_)))
    }

    /// Returns `true` if an empty population caused this error, at any depth.
    pub fn is_empty_population(&self) -> bool {
        self.chain()
            .any(|err| matches!(err, GeneticError::EmptyPopulation))
    }

    /// Returns `true` if an invalid chromosome caused this error, at any depth.
    pub fn is_invalid_chromosome(&self) -> bool {
        self.chain()
            .any(|err| matches!(err, GeneticError::InvalidChromosome { .. }))
    }

    /// Returns `true` if a configuration mistake caused this error, at any depth.
    pub fn is_configuration(&self) -> bool {
        self.chain()
            .any(|err| matches!(err, GeneticError::Configuration(_)))
    }

    /// Returns the generation index and stage if this error came out of the
    /// generation loop.
    pub fn generation(&self) -> Option<(usize, Stage)> {
        match self {
            GeneticError::Generation {
                generation, stage, ..
            } => Some((*generation, *stage)),
            _ => None,
        }
    }
}

/// A specialized Result type for genetic algorithm operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using a closure to
    /// generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
