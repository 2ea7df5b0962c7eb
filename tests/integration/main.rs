//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the light layer against
//! mock adapters. All tests run on the host (x86_64) with no real
//! hardware required.

mod layer_tests;
mod mock_ports;
