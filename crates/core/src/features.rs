//! Feature catalog.
//!
//! Every page and UI element that can be excluded from a role is listed
//! here exactly once. Guarded routes and the role editor both consume this
//! catalog, so identifiers never drift between the two.
//!
//! The evaluator in [`crate::access`] still works on plain strings: a role
//! may carry an identifier the catalog does not know (for example one
//! retired from the portal), and such identifiers are simply never matched.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Grouping used by the role editor to lay out the exclusion checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    /// Member-facing pages (`page_user_*`).
    UserPage,
    /// Administrator pages (`page_admin_*`).
    AdminPage,
    /// Individual UI elements inside a page (`element_*`).
    Element,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A known feature identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    // Member pages
    Events,
    Dashboard,
    MyTickets,
    Bookings,
    Resources,
    Articles,
    JobBoard,
    MemberDirectory,
    Profile,
    Organisation,
    Team,
    Support,

    // Admin pages
    RoleManagement,
    MemberRoleAssignment,
    DataExport,
    EventManagement,
    ArticleManagement,
    ResourceManagement,
    JobPostingManagement,
    BannerManagement,
    FormBuilder,
    CategoryManagement,
    DiscountCodes,
    TicketManagement,

    // Elements
    PurchaseButton,
    TicketBalance,
    VoucherBalance,
    TeamInvite,
    ProfileEdit,
}

impl Feature {
    /// Every catalog entry, in display order.
    pub const ALL: &'static [Feature] = &[
        Feature::Events,
        Feature::Dashboard,
        Feature::MyTickets,
        Feature::Bookings,
        Feature::Resources,
        Feature::Articles,
        Feature::JobBoard,
        Feature::MemberDirectory,
        Feature::Profile,
        Feature::Organisation,
        Feature::Team,
        Feature::Support,
        Feature::RoleManagement,
        Feature::MemberRoleAssignment,
        Feature::DataExport,
        Feature::EventManagement,
        Feature::ArticleManagement,
        Feature::ResourceManagement,
        Feature::JobPostingManagement,
        Feature::BannerManagement,
        Feature::FormBuilder,
        Feature::CategoryManagement,
        Feature::DiscountCodes,
        Feature::TicketManagement,
        Feature::PurchaseButton,
        Feature::TicketBalance,
        Feature::VoucherBalance,
        Feature::TeamInvite,
        Feature::ProfileEdit,
    ];

    fn meta(self) -> (&'static str, &'static str, FeatureCategory) {
        use FeatureCategory::{AdminPage, Element, UserPage};

        match self {
            Feature::Events => ("page_user_Events", "Events", UserPage),
            Feature::Dashboard => ("page_user_Dashboard", "Dashboard", UserPage),
            Feature::MyTickets => ("page_user_MyTickets", "My Tickets", UserPage),
            Feature::Bookings => ("page_user_Bookings", "Bookings", UserPage),
            Feature::Resources => ("page_user_Resources", "Resources", UserPage),
            Feature::Articles => ("page_user_Articles", "Articles", UserPage),
            Feature::JobBoard => ("page_user_JobBoard", "Job Board", UserPage),
            Feature::MemberDirectory => {
                ("page_user_MemberDirectory", "Member Directory", UserPage)
            }
            Feature::Profile => ("page_user_Profile", "My Profile", UserPage),
            Feature::Organisation => ("page_user_Organisation", "Organisation", UserPage),
            Feature::Team => ("page_user_Team", "Team", UserPage),
            Feature::Support => ("page_user_Support", "Support", UserPage),

            Feature::RoleManagement => ("page_admin_RoleManagement", "Role Management", AdminPage),
            Feature::MemberRoleAssignment => (
                "page_admin_MemberRoleAssignment",
                "Member Role Assignment",
                AdminPage,
            ),
            Feature::DataExport => ("page_admin_DataExport", "Data Export", AdminPage),
            Feature::EventManagement => {
                ("page_admin_EventManagement", "Event Management", AdminPage)
            }
            Feature::ArticleManagement => {
                ("page_admin_ArticleManagement", "Article Management", AdminPage)
            }
            Feature::ResourceManagement => {
                ("page_admin_ResourceManagement", "Resource Management", AdminPage)
            }
            Feature::JobPostingManagement => (
                "page_admin_JobPostingManagement",
                "Job Posting Management",
                AdminPage,
            ),
            Feature::BannerManagement => {
                ("page_admin_BannerManagement", "Banner Management", AdminPage)
            }
            Feature::FormBuilder => ("page_admin_FormBuilder", "Form Builder", AdminPage),
            Feature::CategoryManagement => {
                ("page_admin_CategoryManagement", "Category Management", AdminPage)
            }
            Feature::DiscountCodes => ("page_admin_DiscountCodes", "Discount Codes", AdminPage),
            Feature::TicketManagement => {
                ("page_admin_TicketManagement", "Ticket Management", AdminPage)
            }

            Feature::PurchaseButton => ("element_PurchaseButton", "Purchase Button", Element),
            Feature::TicketBalance => ("element_TicketBalance", "Ticket Balance", Element),
            Feature::VoucherBalance => ("element_VoucherBalance", "Voucher Balance", Element),
            Feature::TeamInvite => ("element_TeamInvite", "Team Invite", Element),
            Feature::ProfileEdit => ("element_ProfileEdit", "Edit Profile", Element),
        }
    }

    /// The wire identifier stored in `excluded_features`.
    pub fn id(self) -> &'static str {
        self.meta().0
    }

    /// Human-readable label for the role editor.
    pub fn label(self) -> &'static str {
        self.meta().1
    }

    pub fn category(self) -> FeatureCategory {
        self.meta().2
    }

    /// Look up a catalog entry by its wire identifier.
    pub fn from_id(id: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.id() == id)
    }

    /// Serializable catalog row.
    pub fn info(self) -> FeatureInfo {
        FeatureInfo {
            id: self.id(),
            label: self.label(),
            category: self.category(),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A catalog entry as exposed to the role editor.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub category: FeatureCategory,
}

/// The full catalog in display order.
pub fn catalog() -> Vec<FeatureInfo> {
    Feature::ALL.iter().map(|f| f.info()).collect()
}

/// Return the identifiers in `ids` that the catalog does not know.
pub fn unknown_feature_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    ids.into_iter()
        .map(String::as_str)
        .filter(|id| Feature::from_id(id).is_none())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
