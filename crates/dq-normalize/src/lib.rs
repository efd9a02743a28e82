pub mod infer;
pub mod name;
pub mod normalizer;
pub mod phone;
pub mod template;
pub mod text;

pub use normalizer::normalize;
