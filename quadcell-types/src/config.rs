use serde::{Deserialize, Serialize};

/// How coordinate conversion treats points outside the configured bounds.
///
/// The same policy applies to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutOfBoundsPolicy {
    /// Clamp each axis into the rectangle before conversion.
    #[default]
    Clamp,
    /// Fail the conversion.
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&OutOfBoundsPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
        let policy: OutOfBoundsPolicy = serde_json::from_str("\"clamp\"").unwrap();
        assert_eq!(policy, OutOfBoundsPolicy::Clamp);
    }
}
