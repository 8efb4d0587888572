pub mod composite;
pub mod pixels;
pub mod resolve;
pub mod visibility;
