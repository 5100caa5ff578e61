pub mod density;
pub mod event;
pub mod grid;
pub mod month;
pub mod source;
#[cfg(target_os = "macos")]
pub mod store;

pub use density::{classify, DensityDescriptor, DensityTier, FullDayThreshold};
pub use event::CalendarEvent;
pub use grid::{build_grid, grid_range, DayCell, EventCountLookup, NoEvents};
pub use month::CalendarMonth;
pub use source::{DayCounts, EventDataSource, EventsByDay, MemorySource};
#[cfg(target_os = "macos")]
pub use store::Store;
