pub mod pricing_service;
pub mod reservation_service;
pub mod review_service;
pub mod stay_dates;
