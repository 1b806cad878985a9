use async_trait::async_trait;
use reelscrape_config::Selector;
use crate::error::ScrapeError;

/// Read-only element queries against a loaded page.
///
/// Each query returns one entry per matched element, in document order. An
/// entry is `None` when the element matched but the value could not be read.
#[async_trait]
pub trait DomSource: Send + Sync {
    /// Rendered text of every element matching `selector`
    async fn query_texts(&self, selector: &Selector) -> Result<Vec<Option<String>>, ScrapeError>;

    /// Value of `attribute` on every element matching `selector`
    async fn query_attributes(
        &self,
        selector: &Selector,
        attribute: &str,
    ) -> Result<Vec<Option<String>>, ScrapeError>;
}

/// JS expression evaluating to the array of nodes matched by `selector`.
fn nodes_expression(selector: &Selector) -> String {
    // serde_json yields a valid JS string literal for any input
    let literal = serde_json::Value::String(selector.expression().to_string()).to_string();
    match selector {
        Selector::Css(_) => format!("Array.from(document.querySelectorAll({}))", literal),
        Selector::XPath(_) => format!(
            "(() => {{ \
                const snap = document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                const out = []; \
                for (let i = 0; i < snap.snapshotLength; i++) out.push(snap.snapshotItem(i)); \
                return out; \
            }})()",
            literal
        ),
    }
}

/// Script returning `(string | null)[]` of rendered element text.
pub fn text_script(selector: &Selector) -> String {
    format!(
        "(() => {}.map(n => {{ \
            const t = n.innerText ?? n.textContent; \
            return typeof t === 'string' ? t : null; \
        }}))()",
        nodes_expression(selector)
    )
}

/// Script returning `(string | null)[]` of one attribute per element. The DOM
/// property wins over the raw attribute so `src` comes back as an absolute URL.
pub fn attribute_script(selector: &Selector, attribute: &str) -> String {
    let name = serde_json::Value::String(attribute.to_string()).to_string();
    format!(
        "(() => {}.map(n => {{ \
            const p = n[{name}]; \
            if (typeof p === 'string' && p.length > 0) return p; \
            return n.getAttribute({name}); \
        }}))()",
        nodes_expression(selector),
        name = name
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned query results keyed by selector expression.
    #[derive(Default)]
    pub struct StaticDom {
        texts: HashMap<String, Vec<Option<String>>>,
        attributes: HashMap<(String, String), Vec<Option<String>>>,
        failing: Vec<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StaticDom {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_texts(mut self, selector: &Selector, values: &[&str]) -> Self {
            self.texts.insert(
                selector.expression().to_string(),
                values.iter().map(|v| Some(v.to_string())).collect(),
            );
            self
        }

        pub fn with_raw_texts(mut self, selector: &Selector, values: Vec<Option<String>>) -> Self {
            self.texts.insert(selector.expression().to_string(), values);
            self
        }

        pub fn with_attributes(mut self, selector: &Selector, attribute: &str, values: &[&str]) -> Self {
            self.attributes.insert(
                (selector.expression().to_string(), attribute.to_string()),
                values.iter().map(|v| Some(v.to_string())).collect(),
            );
            self
        }

        pub fn failing(mut self, selector: &Selector) -> Self {
            self.failing.push(selector.expression().to_string());
            self
        }

        fn check(&self, selector: &Selector) -> Result<(), ScrapeError> {
            self.calls.lock().unwrap().push(selector.expression().to_string());
            if self.failing.iter().any(|s| s == selector.expression()) {
                return Err(ScrapeError::query(selector, "simulated failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DomSource for StaticDom {
        async fn query_texts(&self, selector: &Selector) -> Result<Vec<Option<String>>, ScrapeError> {
            self.check(selector)?;
            Ok(self.texts.get(selector.expression()).cloned().unwrap_or_default())
        }

        async fn query_attributes(
            &self,
            selector: &Selector,
            attribute: &str,
        ) -> Result<Vec<Option<String>>, ScrapeError> {
            self.check(selector)?;
            Ok(self
                .attributes
                .get(&(selector.expression().to_string(), attribute.to_string()))
                .cloned()
                .unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_script_uses_query_selector_all() {
        let script = text_script(&Selector::css("h2 strong"));
        assert!(script.contains(r#"document.querySelectorAll("h2 strong")"#));
        assert!(script.contains("innerText"));
    }

    #[test]
    fn test_xpath_script_uses_ordered_snapshot() {
        let script = text_script(&Selector::xpath("//p[strong]"));
        assert!(script.contains(r#"document.evaluate("//p[strong]""#));
        assert!(script.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
    }

    #[test]
    fn test_selector_quotes_are_escaped() {
        let script = text_script(&Selector::css(r#"a[title="x"]"#));
        assert!(script.contains(r#"querySelectorAll("a[title=\"x\"]")"#));
    }

    #[test]
    fn test_attribute_script_reads_property_then_attribute() {
        let script = attribute_script(&Selector::css("img"), "src");
        assert!(script.contains(r#"n["src"]"#));
        assert!(script.contains(r#"n.getAttribute("src")"#));
    }
}
