pub mod food_forecast;
