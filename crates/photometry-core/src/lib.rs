pub mod camera;
pub mod consts;
pub mod error;
pub mod observatory;
pub mod profile;
pub mod stats;
pub mod table;
pub mod time;
pub mod units;

pub use camera::CameraProfile;
pub use error::{PhotometryError, Result};
pub use observatory::Observatory;
pub use units::{Quantity, Unit};
