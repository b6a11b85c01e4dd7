pub use attmat::{KmerGrid, KmerGridBuilder};
pub use error::{Error, Result};
pub use grid::Grid;
pub use kmer::{KmerRecord, Label};
pub use normalize::{zscore, Standardization};

pub mod attmat;
mod error;
pub mod grid;
pub mod kmer;
pub mod normalize;
pub mod num;
pub mod runs;
