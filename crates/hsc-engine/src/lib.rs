//! Hello surface control engine crate.
//!
//! Binds toolkit-managed drawing surfaces to native surface controls and
//! keeps the two in lock-step across create / resize / destroy.

pub mod bridge;
pub mod device;
pub mod native;
pub mod window;

pub mod logging;
