/// Rendering layer: the top bar and side panel widgets, the report view in
/// the central panel, and the tables and bar charts it is built from.

pub mod panels;
pub mod plot;
pub mod report;
pub mod tables;
