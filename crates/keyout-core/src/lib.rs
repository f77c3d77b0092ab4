pub mod buffer;
pub mod consts;
pub mod controller;
pub mod error;
pub mod histogram;
pub mod io;
pub mod mask;
pub mod preset;
pub mod sampler;
pub mod threshold;
pub mod viewport;
