//! Terminal dashboard.

mod event_loop;
mod render;

pub use event_loop::run;
