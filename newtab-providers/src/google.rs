//! Google S2 favicon service.
//!
//! `https://www.google.com/s2/favicons?domain=<host>&sz=<px>` returns a
//! PNG for almost every host. It is tried first at the requested size and
//! again at 16px as the last resort.

use newtab_core::{IconSize, ProviderKind, ProviderMetadata};

use crate::descriptor::{FetchPlan, ProviderDescriptor};

/// Google S2 URL pattern.
pub const GOOGLE_S2_TEMPLATE: &str = "https://www.google.com/s2/favicons?domain={domain}&sz={size}";

const HOMEPAGE: &str = "https://www.google.com/s2/favicons";

/// Creates the primary Google descriptor.
pub fn google_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::builder(ProviderKind::Google)
        .metadata(ProviderMetadata {
            id: ProviderKind::Google,
            display_name: "Google S2".to_string(),
            description: "Google favicon service at the requested size".to_string(),
            homepage: Some(HOMEPAGE.to_string()),
            default_enabled: true,
        })
        .fetch_plan(FetchPlan::new(GOOGLE_S2_TEMPLATE))
        .aliases(&["s2"])
        .build()
}

/// Creates the 16px Google fallback descriptor.
pub fn google_small_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::builder(ProviderKind::GoogleSmall)
        .metadata(ProviderMetadata {
            id: ProviderKind::GoogleSmall,
            display_name: "Google S2 (16px)".to_string(),
            description: "Google favicon service pinned to 16px".to_string(),
            homepage: Some(HOMEPAGE.to_string()),
            default_enabled: true,
        })
        .fetch_plan(FetchPlan::new(GOOGLE_S2_TEMPLATE).with_fixed_size(IconSize::FALLBACK))
        .aliases(&["google-small", "s2-small"])
        .build()
}
