pub mod color;
pub mod sampler;
pub mod smooth;
pub mod stripe;
