//! Common test utilities
//!
//! Proptest strategies for building name and digest strings.

#![allow(dead_code)]

pub mod fixtures;
