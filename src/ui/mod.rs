//! UI module for the egui workout screen.

pub mod screens;
pub mod widgets;
