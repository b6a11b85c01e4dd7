pub use builder::KmerGridBuilder;
pub use kmer_grid::KmerGrid;

mod builder;
mod kmer_grid;
