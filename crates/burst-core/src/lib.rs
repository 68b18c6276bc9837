pub mod align;
pub mod config;
pub mod consts;
pub mod error;
pub mod finish;
pub mod frame;
pub mod io;
pub mod merge;
pub mod pipeline;
pub mod pyramid;
