pub mod install_report;
pub mod installer;
