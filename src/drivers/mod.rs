//! Hardware-adjacent drivers.
//!
//! `debounce` and `tamper` are pure logic consumed by the domain core;
//! `hw_init` and `lcd1602` touch the ESP-IDF and carry simulation stubs
//! for host builds.

pub mod debounce;
pub mod hw_init;
pub mod lcd1602;
pub mod tamper;
