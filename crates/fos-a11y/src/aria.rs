//! ARIA Support
//!
//! ARIA roles and their mapping from markup.

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Alert,
    Button,
    Checkbox,
    Combobox,
    Dialog,
    Link,
    Listbox,
    Menu,
    MenuBar,
    MenuItem,
    Option,
    ProgressBar,
    Radio,
    RadioGroup,
    ScrollBar,
    Slider,
    SpinButton,
    Status,
    Switch,
    Tab,
    TabList,
    TabPanel,
    TextBox,
    Tree,
    TreeItem,
    Meter,

    // Document structure
    Article,
    Cell,
    ColumnHeader,
    Document,
    Figure,
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Paragraph,
    Presentation,
    Row,
    Separator,
    Table,
    Toolbar,

    /// Text leaf (no ARIA counterpart)
    Text,
}

impl AriaRole {
    /// Parse from a `role` attribute value
    ///
    /// Only the first token of a space separated list is considered.
    pub fn parse(s: &str) -> Option<Self> {
        let token = s.split_whitespace().next()?;
        Some(match token.to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "alert" => Self::Alert,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "combobox" => Self::Combobox,
            "dialog" => Self::Dialog,
            "link" => Self::Link,
            "listbox" => Self::Listbox,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "option" => Self::Option,
            "progressbar" => Self::ProgressBar,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "scrollbar" => Self::ScrollBar,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "status" => Self::Status,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "textbox" => Self::TextBox,
            "tree" => Self::Tree,
            "treeitem" => Self::TreeItem,
            "meter" => Self::Meter,
            "article" => Self::Article,
            "cell" => Self::Cell,
            "columnheader" => Self::ColumnHeader,
            "document" => Self::Document,
            "figure" => Self::Figure,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "paragraph" => Self::Paragraph,
            "row" => Self::Row,
            "separator" => Self::Separator,
            "table" => Self::Table,
            "toolbar" => Self::Toolbar,
            "none" | "presentation" => Self::Presentation,
            _ => return None,
        })
    }

    /// Implicit role of an HTML element, `None` for generic containers
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "a" => Self::Link,
            "article" => Self::Article,
            "aside" => Self::Complementary,
            "button" => Self::Button,
            "dialog" => Self::Dialog,
            "figure" => Self::Figure,
            "footer" => Self::ContentInfo,
            "form" => Self::Form,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading,
            "header" => Self::Banner,
            "hr" => Self::Separator,
            "img" => Self::Img,
            "input" | "textarea" => Self::TextBox,
            "li" => Self::ListItem,
            "main" => Self::Main,
            "meter" => Self::Meter,
            "nav" => Self::Navigation,
            "ol" | "ul" => Self::List,
            "option" => Self::Option,
            "p" => Self::Paragraph,
            "progress" => Self::ProgressBar,
            "section" => Self::Region,
            "select" => Self::Listbox,
            "table" => Self::Table,
            "td" => Self::Cell,
            "th" => Self::ColumnHeader,
            "tr" => Self::Row,
            _ => return None,
        })
    }

    /// Roles whose descendants are presentational and never exposed
    pub fn has_presentational_children(&self) -> bool {
        matches!(self,
            Self::Img | Self::ProgressBar | Self::Separator | Self::Slider |
            Self::ScrollBar | Self::Meter | Self::Text
        )
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(self,
            Self::Banner | Self::Complementary | Self::ContentInfo |
            Self::Form | Self::Main | Self::Navigation | Self::Region | Self::Search
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("button"), Some(AriaRole::Button));
        assert_eq!(AriaRole::parse("Navigation"), Some(AriaRole::Navigation));
        assert_eq!(AriaRole::parse("listbox list"), Some(AriaRole::Listbox));
        assert_eq!(AriaRole::parse("none"), Some(AriaRole::Presentation));
        assert_eq!(AriaRole::parse("bogus"), None);
        assert_eq!(AriaRole::parse("  "), None);
        assert!(AriaRole::Navigation.is_landmark());
    }

    #[test]
    fn test_implicit_roles() {
        assert_eq!(AriaRole::from_tag("ul"), Some(AriaRole::List));
        assert_eq!(AriaRole::from_tag("h3"), Some(AriaRole::Heading));
        assert_eq!(AriaRole::from_tag("div"), None);
        assert_eq!(AriaRole::from_tag("span"), None);
    }

    #[test]
    fn test_presentational_children() {
        assert!(AriaRole::Img.has_presentational_children());
        assert!(AriaRole::ProgressBar.has_presentational_children());
        assert!(!AriaRole::List.has_presentational_children());
    }
}
