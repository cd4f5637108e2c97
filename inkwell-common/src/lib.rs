pub mod model;
pub mod paginator;
pub mod util;
