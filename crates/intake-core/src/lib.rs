pub mod calendar;
pub mod decision;
pub mod error;
pub mod ids;
pub mod settings;
pub mod window;
