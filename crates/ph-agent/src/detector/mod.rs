pub mod detection_report;
pub mod detector;
