//! Static catalog of known providers and their models.
//!
//! The catalog is compiled in. Enabling or disabling a provider entry only
//! changes which slice of it is offered, never its contents, so a model that
//! disappears from the offering reappears in registry order when its provider
//! comes back.

use super::provider::AiProvider;

/// Compile-time description of a supported provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Stable slug used in stored data and model entries.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Where to obtain an API key.
    pub api_key_url: &'static str,
}

impl ProviderSpec {
    /// Default store entry for this provider: enabled, no key.
    #[must_use]
    pub fn seed(&self) -> AiProvider {
        AiProvider {
            id: self.id.to_string(),
            name: self.name.to_string(),
            enabled: true,
            api_key: String::new(),
            api_key_url: self.api_key_url.to_string(),
        }
    }
}

/// Providers the application knows about.
pub const PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        id: "openai",
        name: "OpenAI",
        api_key_url: "https://platform.openai.com/api-keys",
    },
    ProviderSpec {
        id: "google-gemini",
        name: "Google Gemini",
        api_key_url: "https://aistudio.google.com/app/apikey",
    },
    ProviderSpec {
        id: "anthropic",
        name: "Anthropic Claude",
        api_key_url: "https://console.anthropic.com/settings/keys",
    },
];

/// A model offering: wire identifier, display label, owning provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Model {
    /// Identifier sent to the provider API.
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Slug of the provider that serves this model.
    pub provider: &'static str,
}

/// Every model the application can offer, in presentation order.
pub const MODELS: &[Model] = &[
    // OpenAI
    Model {
        value: "gpt-4o-mini",
        label: "GPT-4o Mini",
        provider: "openai",
    },
    Model {
        value: "gpt-4o",
        label: "GPT-4o",
        provider: "openai",
    },
    Model {
        value: "gpt-4.1",
        label: "GPT-4.1",
        provider: "openai",
    },
    Model {
        value: "gpt-4.1-mini",
        label: "GPT-4.1 Mini",
        provider: "openai",
    },
    Model {
        value: "gpt-4.1-nano",
        label: "GPT-4.1 Nano",
        provider: "openai",
    },
    Model {
        value: "gpt-4-turbo",
        label: "GPT-4 Turbo",
        provider: "openai",
    },
    Model {
        value: "o3",
        label: "o3",
        provider: "openai",
    },
    Model {
        value: "o3-pro",
        label: "o3 Pro",
        provider: "openai",
    },
    Model {
        value: "o4-mini",
        label: "o4 Mini",
        provider: "openai",
    },
    Model {
        value: "o1",
        label: "o1",
        provider: "openai",
    },
    Model {
        value: "o1-mini",
        label: "o1 Mini",
        provider: "openai",
    },
    // Anthropic
    Model {
        value: "claude-opus-4-1-20250805",
        label: "Claude Opus 4.1",
        provider: "anthropic",
    },
    Model {
        value: "claude-opus-4-20250514",
        label: "Claude Opus 4",
        provider: "anthropic",
    },
    Model {
        value: "claude-sonnet-4-20250514",
        label: "Claude Sonnet 4",
        provider: "anthropic",
    },
    Model {
        value: "claude-3-7-sonnet-20250219",
        label: "Claude 3.7 Sonnet",
        provider: "anthropic",
    },
    Model {
        value: "claude-3-5-sonnet-20241022",
        label: "Claude 3.5 Sonnet",
        provider: "anthropic",
    },
    Model {
        value: "claude-3-5-haiku-20241022",
        label: "Claude 3.5 Haiku",
        provider: "anthropic",
    },
    Model {
        value: "claude-3-haiku-20240307",
        label: "Claude 3 Haiku",
        provider: "anthropic",
    },
    // Google
    Model {
        value: "gemini-3-pro",
        label: "Gemini 3 Pro",
        provider: "google-gemini",
    },
    Model {
        value: "gemini-2.5-pro",
        label: "Gemini 2.5 Pro",
        provider: "google-gemini",
    },
    Model {
        value: "gemini-2.5-flash",
        label: "Gemini 2.5 Flash",
        provider: "google-gemini",
    },
    Model {
        value: "gemini-2.5-flash-lite",
        label: "Gemini 2.5 Flash-Lite",
        provider: "google-gemini",
    },
    Model {
        value: "gemini-2.0-flash",
        label: "Gemini 2.0 Flash",
        provider: "google-gemini",
    },
    Model {
        value: "gemini-2.0-flash-lite",
        label: "Gemini 2.0 Flash-Lite",
        provider: "google-gemini",
    },
];

/// Models offered given the current provider entries.
///
/// A model is offered only when its provider is present in `providers` and
/// enabled; an entry the list does not carry hides that provider's models.
/// Registry order is preserved.
#[must_use]
pub fn available_models(providers: &[AiProvider]) -> Vec<Model> {
    MODELS
        .iter()
        .filter(|model| {
            providers
                .iter()
                .any(|provider| provider.id == model.provider && provider.enabled)
        })
        .copied()
        .collect()
}

/// Available models grouped by provider slug, preserving registry order
/// within and across groups.
#[must_use]
pub fn grouped_models(providers: &[AiProvider]) -> Vec<(&'static str, Vec<Model>)> {
    let mut groups: Vec<(&'static str, Vec<Model>)> = Vec::new();
    for model in available_models(providers) {
        match groups.iter_mut().find(|(id, _)| *id == model.provider) {
            Some((_, models)) => models.push(model),
            None => groups.push((model.provider, vec![model])),
        }
    }
    groups
}

/// Default selection: the first available model, if any.
#[must_use]
pub fn default_model(providers: &[AiProvider]) -> Option<Model> {
    available_models(providers).into_iter().next()
}

/// Look up a model by wire identifier, regardless of provider enablement.
#[must_use]
pub fn find_model(value: &str) -> Option<Model> {
    MODELS.iter().find(|model| model.value == value).copied()
}

/// Whether a model identifier is currently offered.
///
/// Callers holding a selection re-check it here after provider edits; a
/// selection that went stale is theirs to clear or replace.
#[must_use]
pub fn is_available(value: &str, providers: &[AiProvider]) -> bool {
    find_model(value).is_some_and(|model| {
        providers
            .iter()
            .any(|provider| provider.id == model.provider && provider.enabled)
    })
}

/// Look up a provider spec by slug.
#[must_use]
pub fn provider_spec(id: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.id == id)
}

/// Default provider entries, one per registry spec, in registry order.
#[must_use]
pub fn default_providers() -> Vec<AiProvider> {
    PROVIDERS.iter().map(ProviderSpec::seed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers(entries: &[(&str, bool)]) -> Vec<AiProvider> {
        entries
            .iter()
            .map(|(id, enabled)| {
                let mut provider = provider_spec(id).unwrap().seed();
                provider.enabled = *enabled;
                provider
            })
            .collect()
    }

    #[test]
    fn model_values_are_unique() {
        for (i, model) in MODELS.iter().enumerate() {
            assert!(
                MODELS[i + 1..].iter().all(|m| m.value != model.value),
                "duplicate model value: {}",
                model.value
            );
        }
    }

    #[test]
    fn every_model_belongs_to_a_known_provider() {
        for model in MODELS {
            assert!(
                provider_spec(model.provider).is_some(),
                "unknown provider for {}",
                model.value
            );
        }
    }

    #[test]
    fn disabled_provider_hides_its_models() {
        let providers = providers(&[("openai", true), ("anthropic", false)]);
        let models = available_models(&providers);

        assert!(models.iter().any(|m| m.value == "gpt-4o"));
        assert!(models.iter().all(|m| m.provider != "anthropic"));
    }

    #[test]
    fn absent_provider_hides_its_models() {
        // no google-gemini entry at all
        let providers = providers(&[("openai", true), ("anthropic", true)]);
        let models = available_models(&providers);

        assert!(models.iter().all(|m| m.provider != "google-gemini"));
    }

    #[test]
    fn reenabling_restores_registry_order() {
        let mut entries = default_providers();
        entries[0].enabled = false;
        assert!(available_models(&entries).iter().all(|m| m.provider != "openai"));

        entries[0].enabled = true;
        let values: Vec<_> = available_models(&entries).iter().map(|m| m.value).collect();
        let registry: Vec<_> = MODELS.iter().map(|m| m.value).collect();
        assert_eq!(values, registry);
    }

    #[test]
    fn groups_follow_registry_order() {
        let groups = grouped_models(&default_providers());
        let ids: Vec<_> = groups.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["openai", "anthropic", "google-gemini"]);

        let (_, openai_models) = &groups[0];
        assert_eq!(openai_models.first().map(|m| m.value), Some("gpt-4o-mini"));
    }

    #[test]
    fn default_model_is_the_first_available() {
        let all = default_providers();
        assert_eq!(default_model(&all).map(|m| m.value), Some("gpt-4o-mini"));

        let mut without_openai = all.clone();
        without_openai[0].enabled = false;
        assert_eq!(
            default_model(&without_openai).map(|m| m.value),
            Some("claude-opus-4-1-20250805")
        );

        let none: Vec<AiProvider> = all.into_iter().map(|mut p| {
            p.enabled = false;
            p
        }).collect();
        assert_eq!(default_model(&none), None);
    }

    #[test]
    fn availability_tracks_provider_state() {
        let mut entries = default_providers();
        assert!(is_available("gemini-2.5-flash", &entries));

        entries[1].enabled = false;
        assert!(!is_available("gemini-2.5-flash", &entries));
        assert!(is_available("gpt-4o-mini", &entries));
        assert!(!is_available("not-a-model", &entries));
    }

    #[test]
    fn seeds_match_the_registry() {
        let seeds = default_providers();
        assert_eq!(seeds.len(), PROVIDERS.len());
        for (seed, spec) in seeds.iter().zip(PROVIDERS) {
            assert_eq!(seed.id, spec.id);
            assert_eq!(seed.name, spec.name);
            assert_eq!(seed.api_key_url, spec.api_key_url);
            assert!(seed.enabled);
            assert!(seed.api_key.is_empty());
        }
    }
}
