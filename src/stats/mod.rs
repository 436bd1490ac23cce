pub mod aggregate;
pub mod exec;
pub mod grid;
pub mod output;
pub mod render;

pub use aggregate::{aggregate, aggregate_into, count_commit, day_offset};
pub use exec::exec;
pub use grid::{build_grid, build_grid_for};
pub use output::{output_json, stats_output};
pub use render::{cell_style, month_header, render, render_to, Band};
