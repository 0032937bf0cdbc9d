use serde::Serialize;

/// Simulated conditions shown on the hotel detail screen. Cosmetic only;
/// nothing in the booking flow reads this.
#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub temp: i32,
    pub description: String,
    pub icon: String,
    pub humidity: u32,
    pub wind_speed: f32,
    pub feels_like: i32,
    pub city_name: String,
}
