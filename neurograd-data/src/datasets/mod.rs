pub mod array_dataset;
pub mod synthetic;
pub mod traits;

pub use array_dataset::ArrayDataset;
pub use synthetic::make_blobs;
pub use traits::Dataset;
