//! Host-side integration test harness.
//!
//! Drives the full application service through mock port adapters — no
//! hardware, no network, scripted time.

mod controller_tests;
mod mock_hw;
