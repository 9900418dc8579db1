use serde::{Deserialize, Serialize};

/// Presence and length of a secret, never its value.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStatus {
    #[serde(rename = "hasKey")]
    pub has_key: bool,
    pub len: usize,
}

impl KeyStatus {
    /// An empty value counts as unset.
    pub fn inspect(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self {
                has_key: true,
                len: v.chars().count(),
            },
            _ => Self {
                has_key: false,
                len: 0,
            },
        }
    }
}
