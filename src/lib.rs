pub mod api;
pub mod app;
pub mod config;
pub mod export;
pub mod minutes;
pub mod providers;

#[cfg(test)]
pub mod testing;
