pub use builder::{PipelineBuilder, DEFAULT_SUBSET};
pub use counts::{Counts, Percentages};
pub use genomes::Genome;
pub use pipeline::Pipeline;
pub use reads::Reads;
pub use report::Report;

pub mod aligner;
pub mod archive;
mod builder;
mod counts;
pub mod genomes;
pub mod logging;
mod pipeline;
mod reads;
pub mod report;
pub mod subsample;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
