//! Built-in semantic primitives and their typed props.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use valuto_core::Props;

/// The semantic containers every registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Card,
    CardHeader,
    CardTitle,
    CardDescription,
    CardContent,
    CardFooter,
    Button,
    Badge,
    Alert,
    AlertTitle,
    AlertDescription,
    Separator,
    Progress,
}

impl Primitive {
    pub const ALL: [Primitive; 13] = [
        Primitive::Card,
        Primitive::CardHeader,
        Primitive::CardTitle,
        Primitive::CardDescription,
        Primitive::CardContent,
        Primitive::CardFooter,
        Primitive::Button,
        Primitive::Badge,
        Primitive::Alert,
        Primitive::AlertTitle,
        Primitive::AlertDescription,
        Primitive::Separator,
        Primitive::Progress,
    ];

    /// Registry name, as authored in lesson content.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Card => "Card",
            Primitive::CardHeader => "CardHeader",
            Primitive::CardTitle => "CardTitle",
            Primitive::CardDescription => "CardDescription",
            Primitive::CardContent => "CardContent",
            Primitive::CardFooter => "CardFooter",
            Primitive::Button => "Button",
            Primitive::Badge => "Badge",
            Primitive::Alert => "Alert",
            Primitive::AlertTitle => "AlertTitle",
            Primitive::AlertDescription => "AlertDescription",
            Primitive::Separator => "Separator",
            Primitive::Progress => "Progress",
        }
    }

    /// The HTML element the primitive renders as.
    pub fn tag(self) -> &'static str {
        match self {
            Primitive::CardTitle => "h3",
            Primitive::CardDescription => "p",
            Primitive::Button => "button",
            Primitive::AlertTitle => "h5",
            _ => "div",
        }
    }

    /// Classes applied before any variant classes and the author's `className`.
    pub fn base_class(self) -> &'static str {
        match self {
            Primitive::Card => "rounded-lg border bg-card text-card-foreground shadow-sm",
            Primitive::CardHeader => "flex flex-col space-y-1.5 p-6",
            Primitive::CardTitle => "text-2xl font-semibold leading-none tracking-tight",
            Primitive::CardDescription => "text-sm text-muted-foreground",
            Primitive::CardContent => "p-6 pt-0",
            Primitive::CardFooter => "flex items-center p-6 pt-0",
            Primitive::Button => {
                "inline-flex items-center justify-center whitespace-nowrap rounded-md text-sm font-medium transition-colors"
            }
            Primitive::Badge => {
                "inline-flex items-center rounded-full border px-2.5 py-0.5 text-xs font-semibold"
            }
            Primitive::Alert => "relative w-full rounded-lg border p-4",
            Primitive::AlertTitle => "mb-1 font-medium leading-none tracking-tight",
            Primitive::AlertDescription => "text-sm",
            Primitive::Separator => "shrink-0 bg-border",
            Primitive::Progress => "relative h-4 w-full overflow-hidden rounded-full bg-secondary",
        }
    }

    /// Props read by the primitive itself rather than forwarded as attributes.
    pub fn consumed_props(self) -> &'static [&'static str] {
        match self {
            Primitive::Button => &["variant", "size"],
            Primitive::Badge | Primitive::Alert => &["variant"],
            Primitive::Separator => &["orientation"],
            Primitive::Progress => &["value"],
            _ => &[],
        }
    }

    /// Read the primitive's typed configuration out of its props.
    ///
    /// Keys the primitive does not know are ignored. A string naming no known variant
    /// falls back to the default variant; a known key holding a value of the wrong JSON
    /// kind is rejected.
    pub fn configure(self, props: &Props) -> Result<PrimitiveConfig, PropError> {
        Ok(match self {
            Primitive::Button => PrimitiveConfig::Button {
                variant: choice(props, "variant")?,
                size: choice(props, "size")?,
            },
            Primitive::Badge => PrimitiveConfig::Badge {
                variant: choice(props, "variant")?,
            },
            Primitive::Alert => PrimitiveConfig::Alert {
                variant: choice(props, "variant")?,
            },
            Primitive::Separator => PrimitiveConfig::Separator {
                orientation: choice(props, "orientation")?,
            },
            Primitive::Progress => {
                let value: f64 = field(props, "value")?;
                PrimitiveConfig::Progress {
                    value: value.clamp(0.0, 100.0),
                }
            }
            _ => PrimitiveConfig::Plain,
        })
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A prop whose value does not fit the primitive's typed configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid value for prop '{prop}': {reason}")]
pub struct PropError {
    pub prop: String,
    pub reason: String,
}

fn field<T: DeserializeOwned + Default>(props: &Props, key: &str) -> Result<T, PropError> {
    match props.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| PropError {
            prop: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Like [`field`], but an unrecognized variant name degrades to the default.
fn choice<T: DeserializeOwned + Default>(props: &Props, key: &str) -> Result<T, PropError> {
    match props.get(key) {
        Some(Value::String(name)) => {
            Ok(serde_json::from_value(Value::String(name.clone())).unwrap_or_else(|_| {
                tracing::debug!(prop = key, value = %name, "unknown variant, using default");
                T::default()
            }))
        }
        _ => field(props, key),
    }
}

/// Typed configuration of a primitive, read from its props at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveConfig {
    Plain,
    Button { variant: ButtonVariant, size: ButtonSize },
    Badge { variant: BadgeVariant },
    Alert { variant: AlertVariant },
    Separator { orientation: Orientation },
    Progress { value: f64 },
}

impl PrimitiveConfig {
    /// Variant classes appended after the primitive's base class.
    pub fn classes(&self) -> Vec<&'static str> {
        match self {
            PrimitiveConfig::Plain => Vec::new(),
            PrimitiveConfig::Button { variant, size } => vec![variant.class(), size.class()],
            PrimitiveConfig::Badge { variant } => vec![variant.class()],
            PrimitiveConfig::Alert { variant } => vec![variant.class()],
            PrimitiveConfig::Separator { orientation } => vec![match orientation {
                Orientation::Horizontal => "h-[1px] w-full",
                Orientation::Vertical => "h-full w-[1px]",
            }],
            PrimitiveConfig::Progress { .. } => Vec::new(),
        }
    }

    /// Accessibility attributes implied by the configuration.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            PrimitiveConfig::Alert { .. } => vec![("role", "alert".to_string())],
            PrimitiveConfig::Separator { orientation } => vec![
                ("role", "separator".to_string()),
                ("aria-orientation", orientation.as_str().to_string()),
            ],
            PrimitiveConfig::Progress { value } => vec![
                ("role", "progressbar".to_string()),
                ("aria-valuemin", "0".to_string()),
                ("aria-valuemax", "100".to_string()),
                ("aria-valuenow", value.to_string()),
            ],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

impl ButtonVariant {
    pub fn class(self) -> &'static str {
        match self {
            ButtonVariant::Default => "bg-primary text-primary-foreground hover:bg-primary/90",
            ButtonVariant::Destructive => "bg-destructive text-destructive-foreground hover:bg-destructive/90",
            ButtonVariant::Outline => "border border-input bg-background hover:bg-accent",
            ButtonVariant::Secondary => "bg-secondary text-secondary-foreground hover:bg-secondary/80",
            ButtonVariant::Ghost => "hover:bg-accent hover:text-accent-foreground",
            ButtonVariant::Link => "text-primary underline-offset-4 hover:underline",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    Icon,
}

impl ButtonSize {
    pub fn class(self) -> &'static str {
        match self {
            ButtonSize::Default => "h-10 px-4 py-2",
            ButtonSize::Sm => "h-9 rounded-md px-3",
            ButtonSize::Lg => "h-11 rounded-md px-8",
            ButtonSize::Icon => "h-10 w-10",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub fn class(self) -> &'static str {
        match self {
            BadgeVariant::Default => "border-transparent bg-primary text-primary-foreground",
            BadgeVariant::Secondary => "border-transparent bg-secondary text-secondary-foreground",
            BadgeVariant::Destructive => "border-transparent bg-destructive text-destructive-foreground",
            BadgeVariant::Outline => "text-foreground",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    #[default]
    Default,
    Destructive,
}

impl AlertVariant {
    pub fn class(self) -> &'static str {
        match self {
            AlertVariant::Default => "bg-background text-foreground",
            AlertVariant::Destructive => "border-destructive/50 text-destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// A host-defined container registered through a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPrimitive {
    pub name: String,
    /// HTML element to render as.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Classes applied before the author's `className`.
    #[serde(default)]
    pub class: Option<String>,
}

fn default_tag() -> String {
    "div".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        value
            .as_object()
            .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Primitive::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Primitive::ALL.len());
    }

    #[test]
    fn test_button_config() {
        let config = Primitive::Button
            .configure(&props(json!({"variant": "outline", "size": "sm", "className": "mt-2"})))
            .unwrap();

        assert_eq!(
            config,
            PrimitiveConfig::Button {
                variant: ButtonVariant::Outline,
                size: ButtonSize::Sm
            }
        );
        assert_eq!(config.classes().len(), 2);
    }

    #[test]
    fn test_defaults_when_absent() {
        let config = Primitive::Badge.configure(&Props::new()).unwrap();
        assert_eq!(config, PrimitiveConfig::Badge { variant: BadgeVariant::Default });
    }

    #[test]
    fn test_unknown_variant_falls_back_to_default() {
        let config = Primitive::Alert
            .configure(&props(json!({"variant": "sparkly"})))
            .unwrap();
        assert_eq!(config, PrimitiveConfig::Alert { variant: AlertVariant::Default });

        let config = Primitive::Button
            .configure(&props(json!({"variant": "outline", "size": "xl"})))
            .unwrap();
        assert_eq!(
            config,
            PrimitiveConfig::Button {
                variant: ButtonVariant::Outline,
                size: ButtonSize::Default
            }
        );
    }

    #[test]
    fn test_variant_of_wrong_kind_is_rejected() {
        let err = Primitive::Button
            .configure(&props(json!({"size": 3})))
            .unwrap_err();
        assert_eq!(err.prop, "size");
        assert!(err.to_string().starts_with("invalid value for prop 'size'"));
    }

    #[test]
    fn test_progress_is_clamped() {
        let config = Primitive::Progress.configure(&props(json!({"value": 140}))).unwrap();
        assert_eq!(config, PrimitiveConfig::Progress { value: 100.0 });
        assert!(config
            .attributes()
            .contains(&("aria-valuenow", "100".to_string())));
    }

    #[test]
    fn test_progress_rejects_text() {
        let err = Primitive::Progress
            .configure(&props(json!({"value": "half"})))
            .unwrap_err();
        assert_eq!(err.prop, "value");
    }

    #[test]
    fn test_plain_primitives_ignore_props() {
        let config = Primitive::CardContent
            .configure(&props(json!({"variant": 3})))
            .unwrap();
        assert_eq!(config, PrimitiveConfig::Plain);
    }

    #[test]
    fn test_custom_primitive_defaults() {
        let custom: CustomPrimitive = serde_json::from_value(json!({"name": "Callout"})).unwrap();
        assert_eq!(custom.tag, "div");
        assert_eq!(custom.class, None);
    }
}
