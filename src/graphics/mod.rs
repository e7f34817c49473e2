
//! Support for plotting functions: range estimation, sampling, and
//! mapping into canvas space.

pub mod dataset;
pub mod diagram;
pub mod interval;
pub mod mapper;
pub mod range;
pub mod response;
pub mod sampler;
pub mod settings;
