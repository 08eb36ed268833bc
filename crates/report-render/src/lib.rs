//! Output artifacts for the season report: the cleaned CSV table, the chart
//! images, and the console summary block.

pub mod charts;
pub mod summary;
pub mod table;
