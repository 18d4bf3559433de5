pub mod archive;
pub mod drive;
pub mod drive_list;
pub mod error;
pub mod export;
pub mod scene;
pub mod segment;
pub mod track_point;

pub use error::{ExtractError, FormatError, SpeedError};
