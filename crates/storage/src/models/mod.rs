mod character;

pub use character::{Character, DEFAULT_ELO, MAX_NAME_CHARS, NewCharacter};
