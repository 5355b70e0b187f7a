//! Ordered, case-insensitive section/key model
//!
//! Command files repeat both section names (`[Command]` appears dozens of
//! times) and keys (`triggerall` several times per block), so neither can be
//! a map. Sections keep file order. Keys keep the order of their first
//! appearance, and every occurrence of a repeated key is kept as a "shadow"
//! value in file order.

/// A key and every value it was assigned within one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    name: String,
    values: Vec<String>,
}

impl Key {
    /// Key name as written in the file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value assigned to this key
    pub fn value(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or_default()
    }

    /// All values, the first assignment followed by its shadows
    pub fn shadows(&self) -> &[String] {
        &self.values
    }

    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A `[Name]` block and its keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    keys: Vec<Key>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive section name comparison
    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Keys in order of first appearance
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Look up a key case-insensitively
    pub fn key(&self, name: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.name_is(name))
    }

    /// First value of a key, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.key(name).map(Key::value)
    }

    /// Every value of a key in file order; empty if the key is absent
    pub fn shadows(&self, name: &str) -> &[String] {
        self.key(name).map(Key::shadows).unwrap_or_default()
    }

    /// Append a value, adding a shadow when the key already exists
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.keys.iter_mut().find(|k| k.name_is(name)) {
            Some(key) => key.values.push(value),
            None => self.keys.push(Key {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }
}

/// A parsed file: sections in file order, duplicates allowed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<Section>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Every section with the given name, case-insensitively
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections.iter().filter(move |s| s.name_is(name))
    }
}
