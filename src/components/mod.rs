pub mod day_view;
pub mod help;
pub mod month_view;
pub mod status_bar;
pub mod time_bar;

pub use day_view::DayView;
pub use help::render_help;
pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use time_bar::TimeBar;
