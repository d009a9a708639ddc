//! Structural checks on the layout of the test suite

mod coverage;
