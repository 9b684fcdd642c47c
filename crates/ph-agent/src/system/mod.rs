//! Platform backend for the capability traits in `ph_core`.
//!
//! [`SystemBackend`] is the Windows implementation on Windows and an
//! implementation that reports every operation as unsupported elsewhere.

#[cfg(any(windows, test))]
pub mod task_scheduler;
#[cfg(not(windows))]
mod unsupported;
#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
pub use unsupported::UnsupportedSystem as SystemBackend;
#[cfg(windows)]
pub use windows::WindowsSystem as SystemBackend;
