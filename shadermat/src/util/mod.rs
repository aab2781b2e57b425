//! Miscellaneous helpers shared by the scene and the managers.

pub mod registry;
pub mod typedefs;
