//! The site's own `/favicon.ico`.

use newtab_core::{ProviderKind, ProviderMetadata};

use crate::descriptor::{FetchPlan, ProviderDescriptor};

/// Conventional favicon location.
pub const DIRECT_TEMPLATE: &str = "https://{domain}/favicon.ico";

/// Creates the direct descriptor.
pub fn direct_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::builder(ProviderKind::Direct)
        .metadata(ProviderMetadata {
            id: ProviderKind::Direct,
            display_name: "Direct favicon.ico".to_string(),
            description: "Requests /favicon.ico from the site itself".to_string(),
            homepage: None,
            default_enabled: true,
        })
        .fetch_plan(FetchPlan::new(DIRECT_TEMPLATE))
        .aliases(&["favicon", "site"])
        .build()
}
