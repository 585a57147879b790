use std::fmt;

/// Group name for component properties in the inspector
pub const PROPS_GROUP: &str = "props";

/// A section of the style panel and the controls it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleGroup {
    pub name: &'static str,
    pub label: &'static str,
    pub controls: &'static [&'static str],
}

pub const STYLE_GROUPS: &[StyleGroup] = &[
    StyleGroup {
        name: "layout",
        label: "Layout",
        controls: &["display", "overflow", "box-sizing", "visibility", "opacity"],
    },
    StyleGroup {
        name: "flex",
        label: "Flexbox",
        controls: &[
            "flex-direction",
            "flex-wrap",
            "justify-content",
            "align-items",
            "align-content",
            "gap",
            "row-gap",
            "column-gap",
            "flex-grow",
            "flex-shrink",
            "flex-basis",
            "align-self",
            "order",
        ],
    },
    StyleGroup {
        name: "grid",
        label: "Grid",
        controls: &[
            "grid-template-columns",
            "grid-template-rows",
            "grid-auto-flow",
            "justify-items",
            "grid-column",
            "grid-row",
        ],
    },
    StyleGroup {
        name: "spacing",
        label: "Spacing",
        controls: &[
            "margin-top",
            "margin-right",
            "margin-bottom",
            "margin-left",
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ],
    },
    StyleGroup {
        name: "sizing",
        label: "Size",
        controls: &[
            "width",
            "height",
            "min-width",
            "min-height",
            "max-width",
            "max-height",
            "aspect-ratio",
        ],
    },
    StyleGroup {
        name: "position",
        label: "Position",
        controls: &["position", "top", "right", "bottom", "left", "z-index"],
    },
    StyleGroup {
        name: "typography",
        label: "Typography",
        controls: &[
            "font-family",
            "font-size",
            "font-weight",
            "line-height",
            "letter-spacing",
            "text-align",
            "text-transform",
            "text-decoration",
            "color",
        ],
    },
    StyleGroup {
        name: "background",
        label: "Background",
        controls: &[
            "background-color",
            "background-image",
            "background-size",
            "background-position",
            "background-repeat",
            "background-attachment",
        ],
    },
    StyleGroup {
        name: "border",
        label: "Border",
        controls: &[
            "border-style",
            "border-width",
            "border-color",
            "border-radius",
        ],
    },
    StyleGroup {
        name: "effects",
        label: "Effects",
        controls: &["box-shadow", "filter", "transform", "transition", "cursor"],
    },
];

pub fn group(name: &str) -> Option<&'static StyleGroup> {
    STYLE_GROUPS.iter().find(|g| g.name == name)
}

/// First group listing `control`
pub fn group_of(control: &str) -> Option<&'static StyleGroup> {
    STYLE_GROUPS.iter().find(|g| g.controls.contains(&control))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Styles,
    Props,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Styles => "styles",
            ControlKind::Props => "props",
        }
    }
}

/// `kind:key` address of one inspector control, e.g. `styles:width`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlPath {
    pub kind: ControlKind,
    pub key: String,
}

impl ControlPath {
    pub fn styles(key: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Styles,
            key: key.into(),
        }
    }

    pub fn props(key: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Props,
            key: key.into(),
        }
    }

    /// Parse `styles:<key>` or `props:<key>`. Anything else is unrecognised.
    pub fn parse(path: &str) -> Option<Self> {
        let (kind, key) = path.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        match kind.trim() {
            "styles" => Some(Self::styles(key)),
            "props" => Some(Self::props(key)),
            _ => None,
        }
    }
}

impl fmt::Display for ControlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control_paths() {
        assert_eq!(ControlPath::parse("styles:width"), Some(ControlPath::styles("width")));
        assert_eq!(ControlPath::parse("props:label"), Some(ControlPath::props("label")));
        assert_eq!(ControlPath::parse("width"), None);
        assert_eq!(ControlPath::parse("events:click"), None);
        assert_eq!(ControlPath::parse("styles:"), None);
    }

    #[test]
    fn test_display_round_trips_path() {
        assert_eq!(ControlPath::styles("z-index").to_string(), "styles:z-index");
    }

    #[test]
    fn test_group_lookup() {
        assert_eq!(group("sizing").map(|g| g.label), Some("Size"));
        assert_eq!(group_of("font-size").map(|g| g.name), Some("typography"));
        assert!(group("animations").is_none());
    }
}
