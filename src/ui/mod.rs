pub mod detail;
pub mod grid;
pub mod panels;
pub mod scene;
