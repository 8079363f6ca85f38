pub mod app_config;
pub mod upstream;

pub use app_config::Config;
pub use upstream::HttpCouponSource;
