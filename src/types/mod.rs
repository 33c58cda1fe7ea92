pub mod enums;
pub mod id;
pub mod record;

pub use enums::IdClass;
pub use id::{RecordId, Version};
pub use record::IdentifierRecord;

/// A class together with a number inside it, e.g. `FA250`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub class: IdClass,
    pub id: RecordId,
}

impl Target {
    pub fn new(class: IdClass, id: RecordId) -> Self {
        Self { class, id }
    }
}

impl core::fmt::Display for Target {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.class, self.id)
    }
}
