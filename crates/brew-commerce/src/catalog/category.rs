//! Menu categories.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The section of the menu a drink belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Hot,
    Iced,
    Seasonal,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 3] = [Category::Hot, Category::Iced, Category::Seasonal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hot => "Hot",
            Category::Iced => "Iced",
            Category::Seasonal => "Seasonal",
        }
    }
}

/// Parses a category name, ignoring case.
impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(Category::Hot),
            "iced" => Ok(Category::Iced),
            "seasonal" => Ok(Category::Seasonal),
            _ => Err(CommerceError::ValidationError(format!(
                "unknown category '{}', expected one of: {}",
                s,
                Category::ALL.map(|c| c.as_str()).join(", ")
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("ICED".parse::<Category>().unwrap(), Category::Iced);
        assert_eq!("seasonal".parse::<Category>().unwrap(), Category::Seasonal);
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "decaf".parse::<Category>().unwrap_err();
        assert!(matches!(err, CommerceError::ValidationError(_)));
        assert!(err.to_string().contains("Hot, Iced, Seasonal"));
    }

    #[test]
    fn test_category_wire_name() {
        assert_eq!(serde_json::to_string(&Category::Hot).unwrap(), r#""Hot""#);
    }
}
