use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerritoryRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// A selectable candidate: either a bare display string or a `{ name, code }` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Territory {
    Name(String),
    Record(TerritoryRecord),
}

/// Borrowed display view of a [`Territory`] with a usable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerritoryLabel<'a> {
    pub name: &'a str,
    pub code: Option<&'a str>,
}

impl Territory {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn with_code(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Record(TerritoryRecord {
            name: Some(name.into()),
            code: Some(code.into()),
        })
    }

    /// Display name and optional code, or `None` when the entry has no usable name.
    pub fn label(&self) -> Option<TerritoryLabel<'_>> {
        let (name, code) = match self {
            Self::Name(name) => (Some(name.as_str()), None),
            Self::Record(record) => (record.name.as_deref(), record.code.as_deref()),
        };
        let name = name.map(str::trim).filter(|name| !name.is_empty())?;
        let code = code.map(str::trim).filter(|code| !code.is_empty());
        Some(TerritoryLabel { name, code })
    }

    pub fn name(&self) -> Option<&str> {
        self.label().map(|label| label.name)
    }
}

impl From<&str> for Territory {
    fn from(value: &str) -> Self {
        Self::named(value)
    }
}
