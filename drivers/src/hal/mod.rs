//! Hardware Abstraction Layer (HAL) - Chip-Independent Traits
//!
//! This module defines the GPIO programming model shared by every SoC
//! driver and board driver. Application code written against these types
//! does not need to know which chip family it runs on.
//!
//! # Design Principles
//!
//! - **Logical pins**: callers address connector pins, drivers translate
//! - **Typed values**: levels, modes and edges are enums, not integers
//! - **No platform leakage**: traits must not reference chip-specific types
//!
//! # Available Interfaces
//!
//! - [`gpio`]: Pin mode, digital I/O and edge interrupts

pub mod gpio;
