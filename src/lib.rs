pub mod cancellation;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod gene;
pub mod mutation;
pub mod population;
pub mod rng;
pub mod selection;
pub mod solution;

// Re-export commonly used types for convenience
pub use cancellation::{CancelReason, CancellationToken};
pub use error::{GeneticError, OptionExt, Result, Stage};
pub use evolution::{
    ExecutorBuilder, ExecutorOptions, GenerationReport, GeneticAlgorithmExecutor, WorkerLimit,
};
pub use gene::{Gene, ToFitness};
pub use population::Population;
pub use solution::Solution;
