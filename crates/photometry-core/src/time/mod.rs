pub mod barycentric;
pub mod night;
pub mod scales;

pub use barycentric::{barycentric_julian_date, light_travel_time};
pub use night::night_id;
pub use scales::{julian_date, mjd, utc_to_jd_tdb};
