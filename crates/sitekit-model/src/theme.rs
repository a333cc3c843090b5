//! Theme configuration: colors, fonts and border radius.
//!
//! The theme is owned by [`SiteConfig`](crate::SiteConfig) and replaced
//! wholesale on update. Updates are expressed as [`ThemeUpdate`], which is
//! shallow-merged per sub-object: an update that only names
//! `colors.primary` leaves every other color, the fonts and the border
//! radius untouched.

use serde::{Deserialize, Serialize};

/// Color palette for a generated site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Primary brand color.
    pub primary: String,
    /// Accent color for highlights and calls to action.
    pub accent: String,
    /// Page background color.
    pub background: String,
    /// Main text color.
    pub text: String,
    /// Muted/secondary text color.
    pub text_muted: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#1d4ed8".to_owned(),
            accent: "#f59e0b".to_owned(),
            background: "#ffffff".to_owned(),
            text: "#111827".to_owned(),
            text_muted: "#6b7280".to_owned(),
        }
    }
}

/// Font family configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFonts {
    /// Heading font family.
    pub heading: String,
    /// Body font family.
    pub body: String,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            heading: "Inter".to_owned(),
            body: "Inter".to_owned(),
        }
    }
}

/// Border radius scale.
///
/// A closed enumeration at the data level, unlike section types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderRadius {
    None,
    Sm,
    #[default]
    Md,
    Lg,
    Full,
}

impl BorderRadius {
    /// CSS value for this radius step.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Sm => "0.25rem",
            Self::Md => "0.5rem",
            Self::Lg => "1rem",
            Self::Full => "9999px",
        }
    }
}

/// Theme configuration for a generated site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    /// Color palette.
    pub colors: ThemeColors,
    /// Font families.
    pub fonts: ThemeFonts,
    /// Border radius scale step.
    pub border_radius: BorderRadius,
}

impl ThemeConfig {
    /// Apply a partial update, shallow-merging each sub-object.
    ///
    /// Returns a new theme; `self` is not modified.
    #[must_use]
    pub fn merged(&self, update: &ThemeUpdate) -> Self {
        let mut theme = self.clone();
        if let Some(colors) = &update.colors {
            if let Some(primary) = &colors.primary {
                theme.colors.primary = primary.clone();
            }
            if let Some(accent) = &colors.accent {
                theme.colors.accent = accent.clone();
            }
            if let Some(background) = &colors.background {
                theme.colors.background = background.clone();
            }
            if let Some(text) = &colors.text {
                theme.colors.text = text.clone();
            }
            if let Some(text_muted) = &colors.text_muted {
                theme.colors.text_muted = text_muted.clone();
            }
        }
        if let Some(fonts) = &update.fonts {
            if let Some(heading) = &fonts.heading {
                theme.fonts.heading = heading.clone();
            }
            if let Some(body) = &fonts.body {
                theme.fonts.body = body.clone();
            }
        }
        if let Some(radius) = update.border_radius {
            theme.border_radius = radius;
        }
        theme
    }
}

/// Partial color update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorsUpdate {
    pub primary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
}

/// Partial font update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontsUpdate {
    pub heading: Option<String>,
    pub body: Option<String>,
}

/// Partial theme update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeUpdate {
    pub colors: Option<ColorsUpdate>,
    pub fonts: Option<FontsUpdate>,
    pub border_radius: Option<BorderRadius>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serialize_camel_case() {
        let theme = ThemeConfig::default();
        let json = serde_json::to_value(&theme).unwrap();

        assert_eq!(json["colors"]["textMuted"], "#6b7280");
        assert_eq!(json["borderRadius"], "md");
        assert_eq!(json["fonts"]["heading"], "Inter");
    }

    #[test]
    fn test_border_radius_round_trip() {
        for (radius, tag) in [
            (BorderRadius::None, "\"none\""),
            (BorderRadius::Sm, "\"sm\""),
            (BorderRadius::Md, "\"md\""),
            (BorderRadius::Lg, "\"lg\""),
            (BorderRadius::Full, "\"full\""),
        ] {
            assert_eq!(serde_json::to_string(&radius).unwrap(), tag);
            assert_eq!(serde_json::from_str::<BorderRadius>(tag).unwrap(), radius);
        }
    }

    #[test]
    fn test_merged_partial_colors_keeps_rest() {
        let theme = ThemeConfig::default();
        let update = ThemeUpdate {
            colors: Some(ColorsUpdate {
                primary: Some("#000000".to_owned()),
                ..ColorsUpdate::default()
            }),
            ..ThemeUpdate::default()
        };

        let merged = theme.merged(&update);

        assert_eq!(merged.colors.primary, "#000000");
        assert_eq!(merged.colors.accent, theme.colors.accent);
        assert_eq!(merged.fonts, theme.fonts);
        assert_eq!(merged.border_radius, theme.border_radius);
    }

    #[test]
    fn test_merged_empty_update_is_identity() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.merged(&ThemeUpdate::default()), theme);
    }

    #[test]
    fn test_merged_border_radius() {
        let theme = ThemeConfig::default();
        let update = ThemeUpdate {
            border_radius: Some(BorderRadius::Full),
            ..ThemeUpdate::default()
        };

        assert_eq!(theme.merged(&update).border_radius, BorderRadius::Full);
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let theme: ThemeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(theme, ThemeConfig::default());
    }
}
