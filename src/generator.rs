//! Image sources for codepoint ids.

use std::borrow::Cow;

/// Twemoji's CDN root.
pub const DEFAULT_BASE: &str = "https://twemoji.maxcdn.com/v/latest/";

/// Generator used when the caller does not supply one. It produces
/// `https://twemoji.maxcdn.com/v/latest/svg/<id>.svg`.
pub const DEFAULT_GENERATOR: CdnGenerator = CdnGenerator {
    base: Cow::Borrowed(DEFAULT_BASE),
    folder: Cow::Borrowed("svg"),
    ext: Cow::Borrowed(".svg"),
};

/// Maps a codepoint id to an image source.
///
/// Returning `None` or an empty string leaves the emoji as text.
pub trait SourceGenerator {
    fn generate(&self, icon: &str) -> Option<String>;
}

/// Closures return the source directly. An empty string declines.
impl<F> SourceGenerator for F
where
    F: Fn(&str) -> String,
{
    fn generate(&self, icon: &str) -> Option<String> {
        let src = self(icon);
        (!src.is_empty()).then_some(src)
    }
}

/// URL builder for CDN-hosted image sets: `{base}{folder}/{icon}{ext}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CdnGenerator {
    pub base: Cow<'static, str>,
    pub folder: Cow<'static, str>,
    pub ext: Cow<'static, str>,
}

impl CdnGenerator {
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Cow::Owned(base.into());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Cow::Owned(folder.into());
        self
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Cow::Owned(ext.into());
        self
    }
}

impl Default for CdnGenerator {
    fn default() -> Self {
        DEFAULT_GENERATOR
    }
}

impl SourceGenerator for CdnGenerator {
    fn generate(&self, icon: &str) -> Option<String> {
        Some(format!("{}{}/{}{}", self.base, self.folder, icon, self.ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        assert_eq!(
            DEFAULT_GENERATOR.generate("2764").as_deref(),
            Some("https://twemoji.maxcdn.com/v/latest/svg/2764.svg")
        );
    }

    #[test]
    fn test_png_set() {
        let generator = CdnGenerator::default()
            .with_base("/assets/")
            .with_folder("72x72")
            .with_ext(".png");

        assert_eq!(
            generator.generate("1f4a9").as_deref(),
            Some("/assets/72x72/1f4a9.png")
        );
    }

    #[test]
    fn test_closure_declines_with_empty_string() {
        let decline = |_: &str| String::new();
        let local = |icon: &str| format!("/emoji/{icon}.png");

        assert_eq!(decline.generate("2764"), None);
        assert_eq!(local.generate("2764").as_deref(), Some("/emoji/2764.png"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_partial_config() {
        let generator: CdnGenerator =
            serde_json::from_str(r#"{"folder": "72x72", "ext": ".png"}"#).unwrap();

        assert_eq!(generator.base, DEFAULT_BASE);
        assert_eq!(
            generator.generate("1f600").as_deref(),
            Some("https://twemoji.maxcdn.com/v/latest/72x72/1f600.png")
        );
    }
}
