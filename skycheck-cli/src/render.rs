//! Terminal rendering of lookup outcomes. The background class picks the
//! accent color of the weather card.

use chrono::{DateTime, Local, Utc};
use crossterm::style::{Color, Stylize};
use skycheck_core::{BackgroundClass, QueryState, WeatherRecord, background_class_for};

const MISSING: &str = "--";

fn accent(class: BackgroundClass) -> Color {
    match class {
        BackgroundClass::Sunny => Color::Yellow,
        BackgroundClass::Cloudy => Color::Grey,
        BackgroundClass::Rainy => Color::Blue,
        BackgroundClass::Snowy => Color::White,
        BackgroundClass::Default => Color::Cyan,
    }
}

pub fn print_query(query: &QueryState) {
    match query {
        QueryState::Succeeded(record) => print_record(record),
        QueryState::Failed(message) => print_error(message),
        QueryState::Idle | QueryState::Pending => {}
    }
}

pub fn print_record(record: &WeatherRecord) {
    let color = accent(background_class_for(Some(record)));

    println!();
    println!(
        "  {}",
        format!("{}, {}", record.city, record.country).with(color).bold()
    );
    if let Some(condition) = record.first_condition() {
        println!(
            "  {:12} {}",
            "Conditions",
            condition.description.as_str().with(color)
        );
        println!("  {:12} {}", "Icon", condition.icon_url());
    }
    // Temperatures are printed as reported, without rounding.
    println!("  {:12} {} °C", "Temperature", record.temperature_c);
    println!("  {:12} {} °C", "Feels like", record.feels_like_c);
    println!("  {:12} {} %", "Humidity", record.humidity_pct);
    println!("  {:12} {} hPa", "Pressure", record.pressure_hpa);
    println!("  {:12} {} m/s", "Wind", record.wind_speed_mps);
    println!("  {:12} {}", "Sunrise", local_time(record.sunrise_utc()));
    println!("  {:12} {}", "Sunset", local_time(record.sunset_utc()));
    println!();
}

pub fn print_error(message: &str) {
    println!();
    println!("  {}", message.with(Color::Red));
    println!();
}

fn local_time(utc: Option<DateTime<Utc>>) -> String {
    match utc {
        Some(t) => DateTime::<Local>::from(t).format("%H:%M").to_string(),
        None => MISSING.to_string(),
    }
}
