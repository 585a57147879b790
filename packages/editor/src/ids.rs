use atelier_model::Project;

/// Sequential id generator for nodes, fragments, assets and stylesheets
///
/// Ids look like `<prefix>-<n>`. The counter only moves forward, and ids
/// already taken in the project (e.g. from a loaded file) are skipped.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next free id with the default prefix
    pub fn new_id(&mut self, project: &Project) -> String {
        let prefix = self.prefix.clone();
        self.new_id_with_prefix(&prefix, project)
    }

    /// Next free id with a custom prefix, e.g. `fragment` or `sheet`
    pub fn new_id_with_prefix(&mut self, prefix: &str, project: &Project) -> String {
        loop {
            self.count += 1;
            let id = format!("{}-{}", prefix, self.count);
            if !project.contains_id(&id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("node")
    }
}
