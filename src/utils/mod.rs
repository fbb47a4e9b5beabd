//! Small helpers shared by reports and renderers

pub mod string;
