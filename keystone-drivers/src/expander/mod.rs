//! Port expander drivers

pub mod mcp23s17;
