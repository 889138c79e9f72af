//! Seven capabilities mapped to three tiers.
//!
//! Anonymous: view, copy
//! Free: + save, modify*, create*, sequences
//! Paid: + unlimited usage
//!
//! `*` granted here unconditionally; the daily quantity limit is enforced by
//! the usage counter, so the UI can show the action and still reject it with
//! a quota-specific message.

use serde::{Deserialize, Serialize};

use crate::types::Tier;

/// Every gated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    ViewPrompts,
    CopyPrompts,
    SavePrompts,
    ModifyPrompts,
    CreatePrompts,
    CreateSequences,
    UnlimitedUsage,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Self::ViewPrompts,
        Self::CopyPrompts,
        Self::SavePrompts,
        Self::ModifyPrompts,
        Self::CreatePrompts,
        Self::CreateSequences,
        Self::UnlimitedUsage,
    ];

    /// Lowest tier that has this capability.
    pub fn min_tier(&self) -> Tier {
        match self {
            Self::ViewPrompts | Self::CopyPrompts => Tier::Anonymous,

            Self::SavePrompts
            | Self::ModifyPrompts
            | Self::CreatePrompts
            | Self::CreateSequences => Tier::Free,

            Self::UnlimitedUsage => Tier::Paid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewPrompts => "viewPrompts",
            Self::CopyPrompts => "copyPrompts",
            Self::SavePrompts => "savePrompts",
            Self::ModifyPrompts => "modifyPrompts",
            Self::CreatePrompts => "createPrompts",
            Self::CreateSequences => "createSequences",
            Self::UnlimitedUsage => "unlimitedUsage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "viewPrompts" => Some(Self::ViewPrompts),
            "copyPrompts" => Some(Self::CopyPrompts),
            "savePrompts" => Some(Self::SavePrompts),
            "modifyPrompts" => Some(Self::ModifyPrompts),
            "createPrompts" => Some(Self::CreatePrompts),
            "createSequences" => Some(Self::CreateSequences),
            "unlimitedUsage" => Some(Self::UnlimitedUsage),
            _ => None,
        }
    }

    /// Human-readable description for upgrade messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ViewPrompts => "Browse the prompt catalog",
            Self::CopyPrompts => "Copy prompts to the clipboard",
            Self::SavePrompts => "Save prompts to your library",
            Self::ModifyPrompts => "Rewrite prompts with AI",
            Self::CreatePrompts => "Create new prompts with AI",
            Self::CreateSequences => "Build multi-shot prompt sequences",
            Self::UnlimitedUsage => "No daily limit on AI actions",
        }
    }
}

/// Capability flags for one tier. A view, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAccess {
    pub view_prompts: bool,
    pub copy_prompts: bool,
    pub save_prompts: bool,
    pub modify_prompts: bool,
    pub create_prompts: bool,
    pub create_sequences: bool,
    pub unlimited_usage: bool,
}

impl FeatureAccess {
    /// The access table.
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Anonymous => Self {
                view_prompts: true,
                copy_prompts: true,
                save_prompts: false,
                modify_prompts: false,
                create_prompts: false,
                create_sequences: false,
                unlimited_usage: false,
            },
            Tier::Free => Self {
                view_prompts: true,
                copy_prompts: true,
                save_prompts: true,
                modify_prompts: true,
                create_prompts: true,
                create_sequences: true,
                unlimited_usage: false,
            },
            Tier::Paid => Self {
                view_prompts: true,
                copy_prompts: true,
                save_prompts: true,
                modify_prompts: true,
                create_prompts: true,
                create_sequences: true,
                unlimited_usage: true,
            },
        }
    }

    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewPrompts => self.view_prompts,
            Capability::CopyPrompts => self.copy_prompts,
            Capability::SavePrompts => self.save_prompts,
            Capability::ModifyPrompts => self.modify_prompts,
            Capability::CreatePrompts => self.create_prompts,
            Capability::CreateSequences => self.create_sequences,
            Capability::UnlimitedUsage => self.unlimited_usage,
        }
    }
}

/// Check if a tier grants a capability.
pub fn tier_allows(tier: Tier, capability: Capability) -> bool {
    FeatureAccess::for_tier(tier).get(capability)
}

/// All capabilities available at a tier.
pub fn features_for_tier(tier: Tier) -> Vec<Capability> {
    Capability::ALL
        .iter()
        .copied()
        .filter(|c| tier_allows(tier, *c))
        .collect()
}
