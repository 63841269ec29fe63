pub mod frame_source;
pub mod image_io;
pub mod planner;
pub mod sink;
pub mod telemetry;
