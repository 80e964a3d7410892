/// Unique identifier for anything with a pose in the scene (trees and creatures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Index of a tree in the scene's tree registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(pub u32);

/// The three creature variants living in the woodland.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureKind {
    Bird,
    Squirrel,
    Hedgehog,
}

impl CreatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CreatureKind::Bird => "bird",
            CreatureKind::Squirrel => "squirrel",
            CreatureKind::Hedgehog => "hedgehog",
        }
    }
}
