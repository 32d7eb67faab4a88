pub mod app;

mod charts;
mod detail_view;
mod search_view;
