//! Shared test harness modules for the Voltway CLI.

use super::*;

mod helpers;
