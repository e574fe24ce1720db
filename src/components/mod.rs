//! UI components.

pub mod graph_widget;
