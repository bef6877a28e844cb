//! The fixed set of base flavor names membership is computed for.

/// Base flavors published by MegaLinter that extraction tracks.
pub const MEGALINTER_FLAVORS: &[&str] = &[
    "ci_light",
    "cupcake",
    "documentation",
    "dotnet",
    "dotnetweb",
    "go",
    "java",
    "javascript",
    "php",
    "python",
    "ruby",
    "rust",
    "salesforce",
    "security",
    "swift",
    "terraform",
    "formatters",
    "c_cpp",
];

/// Ordered list of flavor names handed to the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorTable {
    names: Vec<String>,
}

impl FlavorTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self { names: Vec::new() };
        for name in names {
            let name = name.into();
            if !table.names.contains(&name) {
                table.names.push(name);
            }
        }
        table
    }

    pub fn megalinter_defaults() -> Self {
        Self::new(MEGALINTER_FLAVORS.iter().copied())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FlavorTable {
    fn default() -> Self {
        Self::megalinter_defaults()
    }
}
