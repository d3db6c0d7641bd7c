pub mod builder;
pub mod sequential;

pub use builder::build_model;
pub use sequential::Sequential;
