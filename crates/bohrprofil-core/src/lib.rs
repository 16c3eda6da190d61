//! Bohrprofil Core Types
//!
//! Foundational types shared by the profile renderer:
//!
//! - **Colors**: CSS color parsing ([`color::Color`])
//! - **Geometry**: points, sizes and bounds in drawing space ([`geometry`])
//! - **Draw**: layered primitives, fill patterns and SVG assembly ([`draw`])

pub mod color;
pub mod draw;
pub mod geometry;
