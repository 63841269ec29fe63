pub mod advisor;
pub mod assist;
pub mod color;
pub mod consts;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod profile;
pub mod quality;
pub mod session;
