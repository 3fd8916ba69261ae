use core::fmt::{self, Display};

/// The datasets the application persists, each stored independently.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum StorageKey {
    Participants,
    Ingredients,
    Devices,
    Todos,
}

impl StorageKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Participants => "participants",
            Self::Ingredients => "ingredients",
            Self::Devices => "devices",
            Self::Todos => "todos",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
