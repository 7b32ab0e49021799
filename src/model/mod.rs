pub mod character;
pub mod gender;
pub mod hierarchy;
pub mod request;

pub use character::Character;
pub use gender::Gender;
pub use hierarchy::{Hierarchy, HierarchyPins};
pub use request::GenerationRequest;
