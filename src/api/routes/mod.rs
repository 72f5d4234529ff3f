pub mod calendar;
pub mod chat;
pub mod export;
pub mod meeting;
