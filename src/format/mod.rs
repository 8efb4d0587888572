pub mod cel;
pub mod chunk;
pub mod header;
pub mod layer;
pub mod palette;
pub mod profile;
pub mod tags;
