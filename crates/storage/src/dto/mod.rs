pub mod character;
pub mod roster;
