use crate::mutations::{Mutation, MutationError};
use crate::store::DocumentStore;
use atelier_model::Stylesheet;

pub struct StylesheetController<'a> {
    store: &'a DocumentStore,
}

impl<'a> StylesheetController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Stylesheet> {
        self.store.get_state().project.stylesheets.clone()
    }

    pub fn stylesheet(&self, id: &str) -> Option<Stylesheet> {
        self.store.get_state().project.stylesheet(id).cloned()
    }

    pub fn global_css(&self) -> String {
        self.store.get_state().project.global_css.clone()
    }

    pub fn global_js(&self) -> String {
        self.store.get_state().project.global_js.clone()
    }

    /// Add an enabled stylesheet; returns its id
    pub fn add_stylesheet(&self, name: &str, content: &str) -> Result<String, MutationError> {
        let stylesheet = Stylesheet {
            id: self.store.new_id_with_prefix("sheet"),
            name: name.to_string(),
            content: content.to_string(),
            enabled: true,
        };
        let id = stylesheet.id.clone();

        self.store.apply(Mutation::AddStylesheet { stylesheet })?;
        Ok(id)
    }

    /// Change any of name, content or enabled; `None` keeps the current value
    pub fn update_stylesheet(
        &self,
        id: &str,
        name: Option<&str>,
        content: Option<&str>,
        enabled: Option<bool>,
    ) -> Result<bool, MutationError> {
        self.store.apply(Mutation::UpdateStylesheet {
            stylesheet_id: id.to_string(),
            name: name.map(str::to_string),
            content: content.map(str::to_string),
            enabled,
        })
    }

    pub fn remove_stylesheet(&self, id: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RemoveStylesheet {
            stylesheet_id: id.to_string(),
        })
    }

    pub fn set_global_css(&self, css: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::SetGlobalCss {
            css: css.to_string(),
        })
    }

    pub fn set_global_js(&self, js: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::SetGlobalJs { js: js.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::fixtures;

    #[test]
    fn test_stylesheet_lifecycle() {
        let store = fixtures::store();

        let id = store.stylesheets().add_stylesheet("base", "body {}").unwrap();
        assert!(id.starts_with("sheet-"));
        assert!(store.stylesheets().stylesheet(&id).unwrap().enabled);

        assert_eq!(
            store
                .stylesheets()
                .update_stylesheet(&id, Some("reset"), None, Some(false)),
            Ok(true)
        );
        let sheet = store.stylesheets().stylesheet(&id).unwrap();
        assert_eq!(sheet.name, "reset");
        assert_eq!(sheet.content, "body {}");
        assert!(!sheet.enabled);

        assert_eq!(store.stylesheets().remove_stylesheet(&id), Ok(true));
        assert_eq!(store.stylesheets().remove_stylesheet(&id), Ok(false));
        assert!(store.stylesheets().list().is_empty());
    }

    #[test]
    fn test_global_code() {
        let store = fixtures::store();

        store.stylesheets().set_global_css(":root { --gap: 8px }").unwrap();
        store.stylesheets().set_global_js("console.log(1)").unwrap();

        assert_eq!(store.stylesheets().global_css(), ":root { --gap: 8px }");
        assert_eq!(store.stylesheets().global_js(), "console.log(1)");
    }
}
