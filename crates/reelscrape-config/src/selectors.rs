use serde::{Deserialize, Serialize};
use std::fmt;

/// Element query understood by the page. In TOML: `{ css = "..." }` or
/// `{ xpath = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    #[serde(rename = "css")]
    Css(String),
    #[serde(rename = "xpath")]
    XPath(String),
}

impl Selector {
    pub fn css(expr: impl Into<String>) -> Self {
        Selector::Css(expr.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Selector::XPath(expr.into())
    }

    pub fn expression(&self) -> &str {
        match self {
            Selector::Css(expr) | Selector::XPath(expr) => expr,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selector::Css(_) => "css",
            Selector::XPath(_) => "xpath",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expression().trim().is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.expression())
    }
}

/// The five list queries plus the two last-record lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_titles")]
    pub titles: Selector,
    #[serde(default = "default_images")]
    pub images: Selector,
    #[serde(default = "default_image_attribute")]
    pub image_attribute: String,
    #[serde(default = "default_directors")]
    pub directors: Selector,
    #[serde(default = "default_casts")]
    pub casts: Selector,
    #[serde(default = "default_descriptions")]
    pub descriptions: Selector,
    #[serde(default = "default_fallback_director")]
    pub fallback_director: Selector,
    #[serde(default = "default_fallback_cast")]
    pub fallback_cast: Selector,
}

fn default_titles() -> Selector {
    Selector::css("span.content_content__i0P3p[data-test='content'] h2 strong")
}

fn default_images() -> Selector {
    Selector::css("div.inlineImage_image-container__aklxu[data-test='inline-image-container'] img")
}

fn default_image_attribute() -> String {
    "src".to_string()
}

fn default_directors() -> Selector {
    Selector::xpath(
        "//span[@class='content_content__i0P3p' and @data-test='content']\
         /p[strong[contains(text(),'Director:') or contains(text(),'Directors:')]]",
    )
}

fn default_casts() -> Selector {
    Selector::xpath(
        "//span[@class='content_content__i0P3p' and @data-test='content']\
         /p[strong and strong[contains(text(),'Starring:')]]",
    )
}

fn default_descriptions() -> Selector {
    Selector::xpath(
        "//span[@data-test='content']/p[not(contains(.,'Director:')) and not(contains(.,'Starring:'))]",
    )
}

fn default_fallback_director() -> Selector {
    Selector::xpath(
        "//span[@class='content_content__i0P3p' and @data-test='content']\
         //p[strong[contains(text(),'Director:') or contains(text(),'Directors:')]]",
    )
}

fn default_fallback_cast() -> Selector {
    Selector::xpath(
        "//span[@class='content_content__i0P3p' and @data-test='content']\
         //p[strong[contains(text(),'Starring:')]]",
    )
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            titles: default_titles(),
            images: default_images(),
            image_attribute: default_image_attribute(),
            directors: default_directors(),
            casts: default_casts(),
            descriptions: default_descriptions(),
            fallback_director: default_fallback_director(),
            fallback_cast: default_fallback_cast(),
        }
    }
}

impl SelectorConfig {
    /// Name/selector pairs, used for validation and diagnostics
    pub fn named(&self) -> [(&'static str, &Selector); 7] {
        [
            ("titles", &self.titles),
            ("images", &self.images),
            ("directors", &self.directors),
            ("casts", &self.casts),
            ("descriptions", &self.descriptions),
            ("fallback_director", &self.fallback_director),
            ("fallback_cast", &self.fallback_cast),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_xpaths_have_no_line_break_gap() {
        let selectors = SelectorConfig::default();
        assert_eq!(
            selectors.directors.expression(),
            "//span[@class='content_content__i0P3p' and @data-test='content']/p[strong[contains(text(),'Director:') or contains(text(),'Directors:')]]"
        );
        assert!(selectors.fallback_cast.expression().contains("']//p[strong"));
    }

    #[test]
    fn test_selector_toml_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: Selector,
            b: Selector,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            a = { css = "h2 strong" }
            b = { xpath = "//p" }
            "#,
        )
        .unwrap();

        assert_eq!(parsed.a, Selector::css("h2 strong"));
        assert_eq!(parsed.b, Selector::xpath("//p"));
        assert_eq!(parsed.b.to_string(), "xpath://p");
    }

    #[test]
    fn test_partial_selector_config_uses_defaults() {
        let parsed: SelectorConfig = toml::from_str(r#"titles = { css = "h3" }"#).unwrap();

        assert_eq!(parsed.titles, Selector::css("h3"));
        assert_eq!(parsed.images, SelectorConfig::default().images);
        assert_eq!(parsed.image_attribute, "src");
    }

    #[test]
    fn test_empty_selector() {
        assert!(Selector::css("  ").is_empty());
        assert!(!Selector::xpath("//p").is_empty());
    }
}
