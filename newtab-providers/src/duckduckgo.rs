//! DuckDuckGo icon service.

use newtab_core::{ProviderKind, ProviderMetadata};

use crate::descriptor::{FetchPlan, ProviderDescriptor};

/// DuckDuckGo URL pattern. The service has no size parameter.
pub const DUCKDUCKGO_TEMPLATE: &str = "https://icons.duckduckgo.com/ip3/{domain}.ico";

/// Creates the DuckDuckGo descriptor.
pub fn duckduckgo_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::builder(ProviderKind::DuckDuckGo)
        .metadata(ProviderMetadata {
            id: ProviderKind::DuckDuckGo,
            display_name: "DuckDuckGo".to_string(),
            description: "DuckDuckGo icon service".to_string(),
            homepage: Some("https://icons.duckduckgo.com".to_string()),
            default_enabled: true,
        })
        .fetch_plan(FetchPlan::new(DUCKDUCKGO_TEMPLATE))
        .aliases(&["ddg"])
        .build()
}
