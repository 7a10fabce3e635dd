pub mod builder;
pub mod executor;
pub mod options;
mod pool;

pub use builder::ExecutorBuilder;
pub use executor::{GenerationReport, GeneticAlgorithmExecutor};
pub use options::{ExecutorOptions, ExecutorOptionsBuilder, WorkerLimit};
