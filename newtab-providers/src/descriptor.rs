//! Provider descriptor system.
//!
//! A descriptor contains all the static configuration for a favicon source:
//! - Metadata (display name, description, homepage)
//! - Fetch plan (URL template, size override, probe method)
//! - CLI configuration (name and aliases)
//!
//! Descriptors are data. [`ProviderDescriptor::build_source`] turns one into
//! an [`IconSource`] the pipeline can run, so adding or reordering sources
//! never touches control flow.

use newtab_core::{Domain, IconSize, ProviderKind, ProviderMetadata};
use newtab_fetch::{IconSource, ProbeMethod, UrlTemplate};

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Complete descriptor for a favicon source.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Provider identifier.
    pub id: ProviderKind,
    /// Display metadata.
    pub metadata: ProviderMetadata,
    /// How to build and check the candidate URL.
    pub fetch_plan: FetchPlan,
    /// CLI configuration.
    pub cli: CliConfig,
}

impl ProviderDescriptor {
    /// Creates a new descriptor builder.
    pub fn builder(id: ProviderKind) -> ProviderDescriptorBuilder {
        ProviderDescriptorBuilder::new(id)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        &self.metadata.display_name
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &str {
        self.cli.name
    }

    /// Renders the candidate URL this source would probe.
    pub fn candidate_url(&self, domain: &Domain, size: IconSize) -> String {
        self.fetch_plan.render(domain, size)
    }

    /// Builds the runnable source for this descriptor.
    pub fn build_source(&self) -> Box<dyn IconSource> {
        Box::new(TemplateSource {
            id: self.cli.name,
            kind: self.id,
            plan: self.fetch_plan.clone(),
        })
    }
}

// ============================================================================
// Fetch Plan
// ============================================================================

/// How a source produces and checks its candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Candidate URL pattern.
    pub template: UrlTemplate,
    /// Size to request regardless of what the caller asked for.
    pub fixed_size: Option<IconSize>,
    /// How the candidate is probed.
    pub probe_method: ProbeMethod,
}

impl FetchPlan {
    /// Creates a plan for `template`, probed with `HEAD` at the caller's size.
    pub fn new(template: &str) -> Self {
        Self {
            template: UrlTemplate::new(template),
            fixed_size: None,
            probe_method: ProbeMethod::Head,
        }
    }

    /// Pins the requested size.
    pub fn with_fixed_size(mut self, size: IconSize) -> Self {
        self.fixed_size = Some(size);
        self
    }

    /// Sets the probe method.
    pub fn with_probe_method(mut self, method: ProbeMethod) -> Self {
        self.probe_method = method;
        self
    }

    /// Renders the candidate URL.
    pub fn render(&self, domain: &Domain, size: IconSize) -> String {
        self.template.render(domain, self.fixed_size.unwrap_or(size))
    }
}

// ============================================================================
// CLI Config
// ============================================================================

/// Names the source answers to on the command line and in settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliConfig {
    /// Primary name.
    pub name: &'static str,
    /// Alternative names.
    pub aliases: &'static [&'static str],
}

// ============================================================================
// Template Source
// ============================================================================

/// An [`IconSource`] driven entirely by a [`FetchPlan`].
#[derive(Debug, Clone)]
pub struct TemplateSource {
    id: &'static str,
    kind: ProviderKind,
    plan: FetchPlan,
}

impl IconSource for TemplateSource {
    fn id(&self) -> &str {
        self.id
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn candidate_url(&self, domain: &Domain, size: IconSize) -> String {
        self.plan.render(domain, size)
    }

    fn probe_method(&self) -> ProbeMethod {
        self.plan.probe_method
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for `ProviderDescriptor`.
pub struct ProviderDescriptorBuilder {
    id: ProviderKind,
    metadata: Option<ProviderMetadata>,
    fetch_plan: Option<FetchPlan>,
    cli: CliConfig,
}

impl ProviderDescriptorBuilder {
    /// Creates a new builder for the given provider.
    pub fn new(id: ProviderKind) -> Self {
        Self {
            id,
            metadata: None,
            fetch_plan: None,
            cli: CliConfig {
                name: id.cli_name(),
                aliases: &[],
            },
        }
    }

    /// Sets the metadata.
    pub fn metadata(mut self, metadata: ProviderMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the fetch plan.
    pub fn fetch_plan(mut self, plan: FetchPlan) -> Self {
        self.fetch_plan = Some(plan);
        self
    }

    /// Sets the CLI aliases.
    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.cli.aliases = aliases;
        self
    }

    /// Builds the descriptor.
    ///
    /// A descriptor without a fetch plan falls back to the site's own
    /// `/favicon.ico`.
    pub fn build(self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.id,
            metadata: self.metadata.unwrap_or_else(|| ProviderMetadata::new(self.id)),
            fetch_plan: self
                .fetch_plan
                .unwrap_or_else(|| FetchPlan::new("https://{domain}/favicon.ico")),
            cli: self.cli,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_size_overrides_request() {
        let plan = FetchPlan::new("https://icons.test/{domain}?sz={size}")
            .with_fixed_size(IconSize::FALLBACK);
        let url = plan.render(&Domain::new("example.com"), IconSize::new(64).unwrap());
        assert_eq!(url, "https://icons.test/example.com?sz=16");
    }

    #[test]
    fn test_builder_defaults() {
        let desc = ProviderDescriptor::builder(ProviderKind::Direct).build();
        assert_eq!(desc.cli_name(), "direct");
        assert_eq!(desc.display_name(), ProviderKind::Direct.display_name());
        assert_eq!(desc.fetch_plan.probe_method, ProbeMethod::Head);
    }

    #[test]
    fn test_build_source_matches_descriptor() {
        let desc = ProviderDescriptor::builder(ProviderKind::Google)
            .fetch_plan(
                FetchPlan::new("https://g.test/?d={domain}&s={size}")
                    .with_probe_method(ProbeMethod::Get),
            )
            .build();
        let source = desc.build_source();
        let domain = Domain::new("rust-lang.org");

        assert_eq!(source.id(), "google");
        assert_eq!(source.kind(), ProviderKind::Google);
        assert_eq!(source.probe_method(), ProbeMethod::Get);
        assert_eq!(
            source.candidate_url(&domain, IconSize::DEFAULT),
            desc.candidate_url(&domain, IconSize::DEFAULT)
        );
    }
}
