use serde::{Deserialize, Serialize};

/// Which half of a two-mode policy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    Basic,
    Expert,
}

/// Visibility lists for one editor mode
///
/// Unless expert mode allows everything, an absent `allow_*` list means
/// nothing of that kind is allowed. Deny lists always win over allow lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_styles: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_styles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_props: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_props: Vec<String>,

    /// Only read in expert mode. Anything but an explicit `false` means
    /// every control starts visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_all_in_expert: Option<bool>,
}

impl ModePolicy {
    pub fn allow_styles<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_styles = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn deny_styles<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny_styles = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_props<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_props = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn deny_props<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny_props = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_all_in_expert(mut self, allow: bool) -> Self {
        self.allow_all_in_expert = Some(allow);
        self
    }
}

/// Per-component style/property visibility policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<ModePolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert: Option<ModePolicy>,

    /// Denied in both modes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_styles: Vec<String>,

    /// Denied in both modes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_props: Vec<String>,
}

impl StylePolicy {
    pub fn mode(&self, mode: PolicyMode) -> Option<&ModePolicy> {
        match mode {
            PolicyMode::Basic => self.basic.as_ref(),
            PolicyMode::Expert => self.expert.as_ref(),
        }
    }

    pub fn with_basic(mut self, policy: ModePolicy) -> Self {
        self.basic = Some(policy);
        self
    }

    pub fn with_expert(mut self, policy: ModePolicy) -> Self {
        self.expert = Some(policy);
        self
    }
}
