use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content domain an uploaded file belongs to
///
/// The backend namespaces object keys per owner type and attaches the file
/// record to the matching entity. Serialized lowercase on the wire; parsing
/// accepts any casing and normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Post,
    Popup,
    Faculty,
    Header,
    Feedback,
    Course,
}

impl FromStr for OwnerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" => Ok(OwnerType::Post),
            "popup" => Ok(OwnerType::Popup),
            "faculty" => Ok(OwnerType::Faculty),
            "header" => Ok(OwnerType::Header),
            "feedback" => Ok(OwnerType::Feedback),
            "course" => Ok(OwnerType::Course),
            _ => Err(anyhow::anyhow!("Invalid owner type: {}", s)),
        }
    }
}

impl Display for OwnerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OwnerType::Post => write!(f, "post"),
            OwnerType::Popup => write!(f, "popup"),
            OwnerType::Faculty => write!(f, "faculty"),
            OwnerType::Header => write!(f, "header"),
            OwnerType::Feedback => write!(f, "feedback"),
            OwnerType::Course => write!(f, "course"),
        }
    }
}

/// Owning record for an uploaded file (e.g. a post or a faculty profile).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub owner_type: OwnerType,
    pub owner_id: String,
}

impl OwnerReference {
    pub fn new(owner_type: OwnerType, owner_id: impl Into<String>) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_type_serializes_lowercase() {
        let json = serde_json::to_string(&OwnerType::Faculty).unwrap();
        assert_eq!(json, "\"faculty\"");
    }

    #[test]
    fn owner_type_parses_any_casing() {
        assert_eq!("post".parse::<OwnerType>().unwrap(), OwnerType::Post);
        assert_eq!("Course".parse::<OwnerType>().unwrap(), OwnerType::Course);
        assert_eq!("HEADER".parse::<OwnerType>().unwrap(), OwnerType::Header);
        assert!("banner".parse::<OwnerType>().is_err());
    }

    #[test]
    fn owner_type_display_matches_wire_form() {
        assert_eq!(OwnerType::Popup.to_string(), "popup");
        assert_eq!(OwnerType::Feedback.to_string(), "feedback");
    }

    #[test]
    fn owner_reference_uses_camel_case_keys() {
        let owner = OwnerReference::new(OwnerType::Post, "42");
        let value = serde_json::to_value(&owner).unwrap();
        assert_eq!(value["ownerType"], "post");
        assert_eq!(value["ownerId"], "42");
    }
}
