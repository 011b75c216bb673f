//! Process exit codes
//!
//! - 0: conversion finished, or the input file was missing (reported, not failed)
//! - 2: tool error (bad configuration, unreadable input, unwritable output)

pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::*;

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
