pub mod check;
pub mod grid;
pub mod preview;
