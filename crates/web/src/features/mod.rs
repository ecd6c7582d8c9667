pub mod characters;
pub mod image_proxy;
pub mod roster;
