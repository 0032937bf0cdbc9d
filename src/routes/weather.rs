use actix_web::{web, HttpResponse, Responder};
use rand::Rng;

use crate::models::weather::WeatherReport;

const TEMPS: [i32; 5] = [19, 22, 24, 28, 32];
const CONDITIONS: [&str; 5] = [
    "partly cloudy",
    "sunny",
    "clear sky",
    "light breeze",
    "pleasant weather",
];

#[derive(serde::Deserialize)]
pub struct WeatherQuery {
    location: Option<String>,
}

/// Simulated current conditions for a hotel's location. The city name is
/// everything before the first comma of the location string.
pub async fn get_weather(params: web::Query<WeatherQuery>) -> impl Responder {
    let city_name = params
        .location
        .as_deref()
        .and_then(|location| location.split(',').next())
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .unwrap_or("Location")
        .to_string();

    let mut rng = rand::thread_rng();
    let temp = TEMPS[rng.gen_range(0..TEMPS.len())];

    let report = WeatherReport {
        temp,
        description: CONDITIONS[rng.gen_range(0..CONDITIONS.len())].to_string(),
        icon: "02d".to_string(),
        humidity: rng.gen_range(40..80),
        wind_speed: (rng.gen_range(1.0..6.0_f32) * 10.0).round() / 10.0,
        feels_like: temp + rng.gen_range(-1..2),
        city_name,
    };

    HttpResponse::Ok().json(report)
}
