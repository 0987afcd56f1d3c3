pub mod audio;
pub mod ml;
pub mod observability;
pub mod video;
