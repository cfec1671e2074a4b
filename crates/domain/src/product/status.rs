//! Product lifecycle state machine.

use std::str::FromStr;

use super::ProductError;

/// The lifecycle status of a product.
///
/// State transitions:
/// ```text
/// Draft ──┬──► Active ◄──► Inactive ──► Archived
///         │                               ▲
///         └───────────────────────────────┘
/// ```
///
/// Active products must be deactivated before they can be archived.
/// Archived is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    /// Created but not yet offered.
    #[default]
    Draft,

    /// Offered for sale; discounts may be applied.
    Active,

    /// Temporarily withdrawn.
    Inactive,

    /// Logically deleted (terminal state).
    Archived,
}

impl ProductStatus {
    pub fn can_activate(&self) -> bool {
        matches!(self, ProductStatus::Draft | ProductStatus::Inactive)
    }

    pub fn can_deactivate(&self) -> bool {
        matches!(self, ProductStatus::Draft | ProductStatus::Active)
    }

    pub fn can_archive(&self) -> bool {
        matches!(self, ProductStatus::Draft | ProductStatus::Inactive)
    }

    pub fn can_update(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_apply_discount(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProductStatus::Archived)
    }

    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProductStatus::Draft),
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(ProductError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ProductStatus; 4] = [
        ProductStatus::Draft,
        ProductStatus::Active,
        ProductStatus::Inactive,
        ProductStatus::Archived,
    ];

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(ProductStatus::default(), ProductStatus::Draft);
    }

    #[test]
    fn test_activation_targets() {
        assert!(ProductStatus::Draft.can_activate());
        assert!(!ProductStatus::Active.can_activate());
        assert!(ProductStatus::Inactive.can_activate());
        assert!(!ProductStatus::Archived.can_activate());
    }

    #[test]
    fn test_active_cannot_be_archived_directly() {
        assert!(ProductStatus::Draft.can_archive());
        assert!(!ProductStatus::Active.can_archive());
        assert!(ProductStatus::Inactive.can_archive());
        assert!(!ProductStatus::Archived.can_archive());
    }

    #[test]
    fn test_only_active_accepts_discounts() {
        for status in ALL {
            assert_eq!(status.can_apply_discount(), status == ProductStatus::Active);
        }
    }

    #[test]
    fn test_archived_is_terminal() {
        for status in ALL {
            assert_eq!(status.is_terminal(), status == ProductStatus::Archived);
            assert_eq!(status.can_update(), !status.is_terminal());
        }
    }

    #[test]
    fn test_string_round_trip() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<ProductStatus>(), Ok(status));
        }
        assert_eq!(ProductStatus::Inactive.to_string(), "inactive");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert_eq!(
            "deleted".parse::<ProductStatus>(),
            Err(ProductError::InvalidStatus("deleted".to_string()))
        );
    }
}
