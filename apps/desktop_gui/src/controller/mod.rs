//! Controller layer: UI events and command orchestration for the upload screen.

pub mod events;
pub mod orchestration;
