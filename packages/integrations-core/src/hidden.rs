//! Hidden system credentials.
//!
//! The platform ships built-in "use credits for X" credentials that users must
//! not manage directly. Their identifiers are configured per integration; when
//! nothing is configured a fixed fallback list is used instead. The fallback is
//! all-or-nothing: a single configured identifier disables it entirely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

/// Integration category a hidden credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationCategory {
    AiProviders,
    MediaGeneration,
    DataTools,
    Marketing,
}

/// Recognized hidden credential keys, one per built-in integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenCredentialKey {
    // AI/ML providers
    Ollama,
    Openai,
    Anthropic,
    Groq,
    Replicate,
    Aiml,
    OpenRouter,
    Nvidia,
    LlamaApi,
    // Media/content generation
    Revid,
    Ideogram,
    Did,
    UnrealSpeech,
    Fal,
    // Data/search/tools
    Jina,
    Exa,
    E2b,
    Mem0,
    Apollo,
    GoogleMaps,
    // Marketing/communication
    Smartlead,
    Zerobounce,
}

impl HiddenCredentialKey {
    /// Every key, in resolution order.
    pub const ALL: [HiddenCredentialKey; 22] = [
        Self::Ollama,
        Self::Openai,
        Self::Anthropic,
        Self::Groq,
        Self::Replicate,
        Self::Aiml,
        Self::OpenRouter,
        Self::Nvidia,
        Self::LlamaApi,
        Self::Revid,
        Self::Ideogram,
        Self::Did,
        Self::UnrealSpeech,
        Self::Fal,
        Self::Jina,
        Self::Exa,
        Self::E2b,
        Self::Mem0,
        Self::Apollo,
        Self::GoogleMaps,
        Self::Smartlead,
        Self::Zerobounce,
    ];

    pub fn category(&self) -> IntegrationCategory {
        use HiddenCredentialKey::*;
        match self {
            Ollama | Openai | Anthropic | Groq | Replicate | Aiml | OpenRouter | Nvidia
            | LlamaApi => IntegrationCategory::AiProviders,
            Revid | Ideogram | Did | UnrealSpeech | Fal => IntegrationCategory::MediaGeneration,
            Jina | Exa | E2b | Mem0 | Apollo | GoogleMaps => IntegrationCategory::DataTools,
            Smartlead | Zerobounce => IntegrationCategory::Marketing,
        }
    }

    /// Suffix of the environment variable carrying this key's identifier.
    pub fn env_suffix(&self) -> &'static str {
        use HiddenCredentialKey::*;
        match self {
            Ollama => "OLLAMA",
            Openai => "OPENAI",
            Anthropic => "ANTHROPIC",
            Groq => "GROQ",
            Replicate => "REPLICATE",
            Aiml => "AIML",
            OpenRouter => "OPEN_ROUTER",
            Nvidia => "NVIDIA",
            LlamaApi => "LLAMA_API",
            Revid => "REVID",
            Ideogram => "IDEOGRAM",
            Did => "DID",
            UnrealSpeech => "UNREAL_SPEECH",
            Fal => "FAL",
            Jina => "JINA",
            Exa => "EXA",
            E2b => "E2B",
            Mem0 => "MEM0",
            Apollo => "APOLLO",
            GoogleMaps => "GOOGLE_MAPS",
            Smartlead => "SMARTLEAD",
            Zerobounce => "ZEROBOUNCE",
        }
    }
}

/// Fixed identifiers used when no hidden credential is configured.
pub const FALLBACK_HIDDEN_CREDENTIAL_IDS: [&str; 22] = [
    "744fdc56-071a-4761-b5a5-0af0ce10a2b5", // Ollama
    "fdb7f412-f519-48d1-9b5f-d2f73d0e01fe", // Revid
    "760f84fc-b270-42de-91f6-08efe1b512d0", // Ideogram
    "6b9fc200-4726-4973-86c9-cd526f5ce5db", // Replicate
    "53c25cb8-e3ee-465c-a4d1-e75a4c899c2a", // OpenAI
    "24e5d942-d9e3-4798-8151-90143ee55629", // Anthropic
    "aad82a89-9794-4ebb-977f-d736aa5260a3", // AI/ML
    "4ec22295-8f97-4dd1-b42b-2c6957a02545", // Groq
    "7f7b0654-c36b-4565-8fa7-9a52575dfae2", // D-ID
    "7f26de70-ba0d-494e-ba76-238e65e7b45f", // Jina
    "66f20754-1b81-48e4-91d0-f4f0dd82145f", // Unreal Speech
    "b5a0e27d-0c98-4df3-a4b9-10193e1f3c40", // Open Router
    "6c0f5bd0-9008-4638-9d79-4b40b631803e", // FAL
    "96153e04-9c6c-4486-895f-5bb683b1ecec", // Exa
    "78d19fd7-4d59-4a16-8277-3ce310acf2b7", // E2B
    "96b83908-2789-4dec-9968-18f0ece4ceb3", // Nvidia
    "ed55ac19-356e-4243-a6cb-bc599e9b716f", // Mem0
    "544c62b5-1d0f-4156-8fb4-9525f11656eb", // Apollo
    "3bcdbda3-84a3-46af-8fdb-bfd2472298b8", // SmartLead
    "63a6e279-2dc2-448e-bf57-85776f7176dc", // ZeroBounce
    "9aa1bde0-4947-4a70-a20c-84daa3850d52", // Google Maps
    "d44045af-1c33-4833-9e19-752313214de2", // Llama API
];

const ENV_PREFIX: &str = "HIDDEN_CRED_";
const LEGACY_ENV_PREFIX: &str = "NEXT_PUBLIC_HIDDEN_CRED_";

/// Configured hidden credential identifiers, keyed by integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenCredentialsConfig {
    ids: BTreeMap<HiddenCredentialKey, String>,
}

impl HiddenCredentialsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier for a key.
    pub fn with(mut self, key: HiddenCredentialKey, id: &str) -> Self {
        self.set(key, id);
        self
    }

    pub fn set(&mut self, key: HiddenCredentialKey, id: &str) {
        self.ids.insert(key, id.to_string());
    }

    pub fn get(&self, key: HiddenCredentialKey) -> Option<&str> {
        self.ids.get(&key).map(String::as_str)
    }

    /// Read `HIDDEN_CRED_<KEY>` (or the legacy `NEXT_PUBLIC_HIDDEN_CRED_<KEY>`)
    /// from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        for key in HiddenCredentialKey::ALL {
            let value = lookup(&format!("{ENV_PREFIX}{}", key.env_suffix()))
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(&format!("{LEGACY_ENV_PREFIX}{}", key.env_suffix())))
                .filter(|v| !v.is_empty());
            if let Some(value) = value {
                config.set(key, &value);
            }
        }
        config
    }

    /// Layer `other` on top of `self`; keys set in `other` win.
    pub fn merged_with(&self, other: &HiddenCredentialsConfig) -> Self {
        let mut ids = self.ids.clone();
        ids.extend(other.ids.iter().map(|(k, v)| (*k, v.clone())));
        Self { ids }
    }

    /// Non-empty configured identifiers, in [`HiddenCredentialKey::ALL`] order.
    pub fn configured_ids(&self) -> Vec<String> {
        HiddenCredentialKey::ALL
            .iter()
            .filter_map(|key| self.ids.get(key))
            .filter(|id| !id.is_empty())
            .cloned()
            .collect()
    }
}

/// Where a resolved hidden ID list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenIdsSource {
    Configured,
    Fallback,
}

/// Resolved set of hidden credential identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenIds {
    ids: Vec<String>,
    source: HiddenIdsSource,
}

impl HiddenIds {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|hidden| hidden == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn source(&self) -> HiddenIdsSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Resolve the hidden identifiers: configured ones, or the fallback list when none are configured.
pub fn resolve_hidden_ids(config: &HiddenCredentialsConfig) -> HiddenIds {
    let configured = config.configured_ids();
    if configured.is_empty() {
        tracing::debug!("No hidden credentials configured, using fallback list");
        HiddenIds {
            ids: FALLBACK_HIDDEN_CREDENTIAL_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            source: HiddenIdsSource::Fallback,
        }
    } else {
        HiddenIds {
            ids: configured,
            source: HiddenIdsSource::Configured,
        }
    }
}

/// Holds one resolved value and recomputes it only when the config changes.
#[derive(Debug, Default)]
pub struct HiddenIdsCache {
    cached: Option<(HiddenCredentialsConfig, HiddenIds)>,
}

impl HiddenIdsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, config: &HiddenCredentialsConfig) -> &HiddenIds {
        if self
            .cached
            .as_ref()
            .is_some_and(|(cached_config, _)| cached_config != config)
        {
            self.cached = None;
        }
        &self
            .cached
            .get_or_insert_with(|| (config.clone(), resolve_hidden_ids(config)))
            .1
    }
}
