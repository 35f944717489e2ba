/*!
 * Core Module
 * Shared serialization helpers
 */

pub mod serde;
