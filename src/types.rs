use std::fmt::{self, Display};

/// The only category string recognised as a success.
pub const SUCCESS_MARKER: &str = "success";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Success,
    Error,
}

impl Category {
    /// Exact, case-sensitive match against [`SUCCESS_MARKER`]; anything else is an error.
    #[must_use]
    pub fn from_marker(marker: &str) -> Self {
        if marker == SUCCESS_MARKER {
            Self::Success
        } else {
            Self::Error
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl From<&str> for Category {
    fn from(marker: &str) -> Self {
        Self::from_marker(marker)
    }
}

impl From<Option<&str>> for Category {
    fn from(marker: Option<&str>) -> Self {
        marker.map_or(Self::Error, Self::from_marker)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub text: String,
    pub category: Category,
}

impl Notification {
    pub fn new(text: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// Classification assigned to a target: a base class plus one variant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassList {
    pub base: String,
    pub variant: String,
    pub category: Category,
}

impl ClassList {
    /// Whether `class` is one of the two assigned class names.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.base == class || self.variant == class
    }
}

impl Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, ClassList};

    #[test]
    fn only_exact_marker_is_success() {
        assert_eq!(Category::from_marker("success"), Category::Success);
        assert_eq!(Category::from_marker("Success"), Category::Error);
        assert_eq!(Category::from_marker(" success"), Category::Error);
        assert_eq!(Category::from_marker(""), Category::Error);
        assert_eq!(Category::from_marker("warning"), Category::Error);
    }

    #[test]
    fn absent_category_is_error() {
        assert_eq!(Category::from(None), Category::Error);
        assert_eq!(Category::from(Some("success")), Category::Success);
    }

    #[test]
    fn class_list_renders_base_then_variant() {
        let classes = ClassList {
            base: "message".to_string(),
            variant: "error".to_string(),
            category: Category::Error,
        };
        assert_eq!(classes.to_string(), "message error");
        assert!(classes.contains("error"));
        assert!(!classes.contains("success"));
    }
}
