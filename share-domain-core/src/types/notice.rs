//! User-facing notifications
//!
//! Notices carry an i18n key plus parameters; the host resolves the text.

use std::collections::BTreeMap;

use serde::Serialize;

use super::config::PLUGIN_NAME;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient notification shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    /// Link copied; `domain_name` is the option's display name
    LinkCopied { domain_name: String },
    CopyFailed,
    /// Clipboard unavailable, the URL has to be copied by hand
    ManualCopy { url: String },
    ShareCanceled,
    CancelShareFailed,
    /// Host unreachable, the fallback link was used instead
    ShareFallback,
    SettingsSaved,
    SaveConfigFailed,
    LoadConfigFailed,
    /// Name or URL left empty in the domain form
    FillCompleteInfo,
    InvalidUrl,
    InvalidPassword,
}

impl Notice {
    #[must_use]
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::LinkCopied { .. } | Self::ShareCanceled | Self::SettingsSaved => {
                NoticeLevel::Success
            }
            Self::ShareFallback => NoticeLevel::Warning,
            Self::ManualCopy { .. } => NoticeLevel::Info,
            Self::CopyFailed
            | Self::CancelShareFailed
            | Self::SaveConfigFailed
            | Self::LoadConfigFailed
            | Self::FillCompleteInfo
            | Self::InvalidUrl
            | Self::InvalidPassword => NoticeLevel::Error,
        }
    }

    /// Translation key inside the plugin's resource bundle
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::LinkCopied { .. } => "share.linkCopied",
            Self::CopyFailed => "share.copyFailed",
            Self::ManualCopy { .. } => "share.manualCopy",
            Self::ShareCanceled => "share.shareCanceled",
            Self::CancelShareFailed => "share.cancelShareFailed",
            Self::ShareFallback => "share.fallbackLink",
            Self::SettingsSaved => "messages.settingsSaved",
            Self::SaveConfigFailed => "messages.saveConfigFailed",
            Self::LoadConfigFailed => "messages.loadConfigFailed",
            Self::FillCompleteInfo => "messages.fillCompleteInfo",
            Self::InvalidUrl => "messages.invalidUrl",
            Self::InvalidPassword => "messages.invalidPassword",
        }
    }

    /// Namespaced key, e.g. `custom-share-domain-plugin:share.copyFailed`
    #[must_use]
    pub fn i18n_key(&self) -> String {
        format!("{PLUGIN_NAME}:{}", self.key())
    }

    /// `{{param}}` substitutions for the translated text
    #[must_use]
    pub fn params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        match self {
            Self::LinkCopied { domain_name } => {
                params.insert("domainName", domain_name.clone());
            }
            Self::ManualCopy { url } => {
                params.insert("url", url.clone());
            }
            _ => {}
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_copied_carries_domain_name() {
        let n = Notice::LinkCopied {
            domain_name: "Blog".into(),
        };
        assert_eq!(n.level(), NoticeLevel::Success);
        assert_eq!(n.i18n_key(), "custom-share-domain-plugin:share.linkCopied");
        assert_eq!(n.params().get("domainName").map(String::as_str), Some("Blog"));
    }

    #[test]
    fn failures_are_errors_without_params() {
        assert_eq!(Notice::SaveConfigFailed.level(), NoticeLevel::Error);
        assert!(Notice::SaveConfigFailed.params().is_empty());
    }
}
