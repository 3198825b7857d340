//! Fixed choice sets for status, category and type columns.
//!
//! Each set is stored as `TEXT` in PostgreSQL behind a `CHECK` constraint
//! listing the same values. Handlers validate against these enums first so
//! clients get a 400 with the allowed values rather than a constraint error.

use crate::error::CoreError;

/// A closed set of stored values with human-readable labels.
pub trait Choice: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The value persisted in the database and accepted over the API.
    fn value(self) -> &'static str;

    /// The display label (`*_display` fields in responses).
    fn label(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == raw)
    }
}

macro_rules! choices {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

choices! {
    /// Publication state shared by blog posts and news articles.
    PublishStatus {
        Draft => ("draft", "Draft"),
        Published => ("published", "Published"),
    }
}

choices! {
    BlogCategory {
        Governance => ("governance", "Governance"),
        Leadership => ("leadership", "Leadership"),
        YouthPowered => ("youth_powered", "Youth Powered"),
        Accountability => ("accountability", "Accountability"),
    }
}

choices! {
    NewsCategory {
        LatestBlogs => ("latest_blogs", "Latest on Blogs"),
        NewsUpdates => ("news_updates", "News and Updates"),
        Parliament => ("parliament", "Parliament News"),
        Governance => ("governance", "Governance"),
        Accountability => ("accountability", "Accountability"),
    }
}

choices! {
    BillType {
        Government => ("government", "Government"),
        PrivateMember => ("private_member", "Private Member"),
    }
}

choices! {
    /// Legislative progress of a bill, in order.
    BillStatus {
        FirstReading => ("1st_reading", "1st Reading"),
        SecondReading => ("2nd_reading", "2nd Reading"),
        ThirdReading => ("3rd_reading", "3rd Reading"),
        Passed => ("passed", "Passed by Parliament"),
        Assented => ("assented", "Assented to by the President"),
    }
}

choices! {
    ReadingStage {
        First => ("1st_reading", "1st Reading"),
        Second => ("2nd_reading", "2nd Reading"),
        Third => ("3rd_reading", "3rd Reading"),
    }
}

choices! {
    XSpaceStatus {
        Upcoming => ("upcoming", "Upcoming"),
        Live => ("live", "Live"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

choices! {
    ContactStatus {
        New => ("new", "New"),
        InProgress => ("in_progress", "In Progress"),
        Resolved => ("resolved", "Resolved"),
    }
}

choices! {
    DonationStatus {
        New => ("new", "New"),
        Acknowledged => ("acknowledged", "Acknowledged"),
        Processed => ("processed", "Processed"),
        Completed => ("completed", "Completed"),
    }
}

choices! {
    DonationMethod {
        MobileMoney => ("mobile-money", "Mobile Money"),
        BankTransfer => ("bank-transfer", "Bank Transfer"),
        Other => ("other", "Other"),
    }
}

choices! {
    /// Document kinds served from the resources section.
    ResourceKind {
        Explainer => ("explainer", "Explainer"),
        Report => ("report", "Reports & Briefs"),
        PartnerPublication => ("partner_publication", "Partner Publication"),
        Statement => ("statement", "Statement"),
    }
}

choices! {
    MessageRole {
        User => ("user", "User"),
        Assistant => ("assistant", "Assistant"),
    }
}

/// Return the display label for a stored value.
///
/// Values outside the set fall back to the raw value so legacy rows still
/// render.
pub fn display_label<C: Choice>(raw: &str) -> String {
    C::parse(raw)
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Reject a value that is not a member of `C`.
pub fn validate_choice<C: Choice>(field: &str, raw: &str) -> Result<(), CoreError> {
    if C::parse(raw).is_some() {
        return Ok(());
    }
    let allowed: Vec<&str> = C::ALL.iter().map(|c| c.value()).collect();
    Err(CoreError::Validation(format!(
        "Invalid {field} '{raw}'. Must be one of: {}",
        allowed.join(", ")
    )))
}

/// Validate an optional field; `None` always passes.
pub fn validate_optional_choice<C: Choice>(
    field: &str,
    raw: Option<&str>,
) -> Result<(), CoreError> {
    match raw {
        Some(value) => validate_choice::<C>(field, value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_value() {
        for status in BillStatus::ALL {
            assert_eq!(BillStatus::parse(status.value()), Some(*status));
        }
    }

    #[test]
    fn display_label_uses_human_label() {
        assert_eq!(display_label::<BlogCategory>("youth_powered"), "Youth Powered");
        assert_eq!(
            display_label::<BillStatus>("assented"),
            "Assented to by the President"
        );
    }

    #[test]
    fn display_label_falls_back_to_raw_value() {
        assert_eq!(display_label::<NewsCategory>("sports"), "sports");
    }

    #[test]
    fn validate_choice_lists_allowed_values() {
        let err = validate_choice::<XSpaceStatus>("status", "paused").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid status 'paused'"));
        assert!(msg.contains("upcoming, live, completed, cancelled"));
    }

    #[test]
    fn validate_optional_choice_skips_none() {
        assert!(validate_optional_choice::<DonationMethod>("donation_method", None).is_ok());
        assert!(
            validate_optional_choice::<DonationMethod>("donation_method", Some("cash")).is_err()
        );
    }

    #[test]
    fn reading_stages_share_bill_status_values() {
        for stage in ReadingStage::ALL {
            assert!(BillStatus::parse(stage.value()).is_some());
        }
    }
}
