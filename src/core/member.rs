use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a member of an expense group.
///
/// The id is an opaque stable string owned by the surrounding data
/// layer; the engine only requires uniqueness within a group.
///
/// # Examples
///
/// ```
/// use split_engine::core::member::MemberId;
///
/// let anna = MemberId::new("anna");
/// let ben = MemberId::new("ben");
/// assert_ne!(anna, ben);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new member identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this member ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A member of an expense group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_equality() {
        let a = MemberId::new("anna");
        let b = MemberId::new("anna");
        let c = MemberId::new("ben");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_member_id_display() {
        let id = MemberId::new("carla");
        assert_eq!(format!("{}", id), "carla");
    }

    #[test]
    fn test_member_construction() {
        let m = Member::new("anna", "Anna");
        assert_eq!(m.id.as_str(), "anna");
        assert_eq!(m.name, "Anna");
    }
}
