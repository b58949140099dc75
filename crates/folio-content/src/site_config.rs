//! Hand-authored site configuration and its structural validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::navigation::NavigationItem;

/// Static site configuration: identity, author, header and footer links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<Social>,
    pub navigation: Vec<NavigationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<NavigationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl SiteConfig {
    /// Validate and convert an untyped value.
    ///
    /// Returns `None` if the value fails [`validate_site_config`] or an
    /// optional field has the wrong type.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        if !validate_site_config(&value) {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Folio".to_owned(),
            description: "Project documentation".to_owned(),
            url: "http://localhost:3000".to_owned(),
            logo: None,
            favicon: None,
            author: Author {
                name: "Folio".to_owned(),
                email: None,
                url: None,
            },
            social: None,
            navigation: vec![NavigationItem::link("Docs", "/docs")],
            footer: None,
        }
    }
}

/// Structural check of an untyped site configuration.
///
/// Requires an object with string `name`, `description` and `url`, an
/// `author` object with a string `name`, and a `navigation` array whose
/// entries are objects with string `title` and `href`. Optional fields are
/// not inspected.
#[must_use]
pub fn validate_site_config(value: &Value) -> bool {
    let Some(config) = value.as_object() else {
        return false;
    };
    let is_string = |v: Option<&Value>| v.is_some_and(Value::is_string);

    is_string(config.get("name"))
        && is_string(config.get("description"))
        && is_string(config.get("url"))
        && config
            .get("author")
            .and_then(Value::as_object)
            .is_some_and(|author| is_string(author.get("name")))
        && config
            .get("navigation")
            .and_then(Value::as_array)
            .is_some_and(|items| {
                items.iter().all(|item| {
                    item.as_object().is_some_and(|item| {
                        is_string(item.get("title")) && is_string(item.get("href"))
                    })
                })
            })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn valid() -> Value {
        json!({
            "name": "Docs",
            "description": "Project docs",
            "url": "https://docs.example.com",
            "author": { "name": "Jane", "email": "jane@example.com" },
            "social": { "github": "https://github.com/example" },
            "navigation": [
                { "title": "Docs", "href": "/docs", "description": "Read the docs" },
                { "title": "GitHub", "href": "https://github.com/example", "external": true }
            ],
            "footer": { "copyright": "© 2025 Example" }
        })
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_site_config(&valid()));
    }

    #[test]
    fn test_not_an_object() {
        assert!(!validate_site_config(&json!(null)));
        assert!(!validate_site_config(&json!("site")));
        assert!(!validate_site_config(&json!([])));
    }

    #[test]
    fn test_missing_or_mistyped_required_fields() {
        for field in ["name", "description", "url", "author", "navigation"] {
            let mut config = valid();
            config.as_object_mut().unwrap().remove(field);
            assert!(!validate_site_config(&config), "missing {field}");
        }

        let mut config = valid();
        config["url"] = json!(42);
        assert!(!validate_site_config(&config));
    }

    #[test]
    fn test_author_requires_name() {
        let mut config = valid();
        config["author"] = json!({ "email": "jane@example.com" });
        assert!(!validate_site_config(&config));

        config["author"] = json!(null);
        assert!(!validate_site_config(&config));
    }

    #[test]
    fn test_navigation_items_checked() {
        let mut config = valid();
        config["navigation"] = json!([{ "title": "Docs" }]);
        assert!(!validate_site_config(&config));

        config["navigation"] = json!(["Docs"]);
        assert!(!validate_site_config(&config));

        config["navigation"] = json!([]);
        assert!(validate_site_config(&config));
    }

    #[test]
    fn test_from_value() {
        let config = SiteConfig::from_value(valid()).unwrap();

        assert_eq!(config.name, "Docs");
        assert_eq!(config.author.email.as_deref(), Some("jane@example.com"));
        assert_eq!(config.navigation[1].external, Some(true));
        assert_eq!(
            config.social.and_then(|s| s.github).as_deref(),
            Some("https://github.com/example")
        );
    }

    #[test]
    fn test_from_value_invalid() {
        assert_eq!(SiteConfig::from_value(json!({ "name": "Docs" })), None);

        let mut config = valid();
        config["logo"] = json!(7);
        assert_eq!(SiteConfig::from_value(config), None);
    }

    #[test]
    fn test_default_is_valid() {
        let value = serde_json::to_value(SiteConfig::default()).unwrap();

        assert!(validate_site_config(&value));
    }
}
