//! Record types produced by the line parser.

/// One `KEY[;PARAMS]:VALUE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (uppercase, group prefix removed).
    pub name: String,
    /// Raw parameter strings in order of appearance (e.g. `TYPE=WORK`).
    pub params: Vec<String>,
    /// Value exactly as it appeared after the first colon.
    pub value: String,
}

/// One `BEGIN ... END` block as an ordered list of properties.
///
/// Repeated keys are kept in order; nothing is overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    kind: String,
    properties: Vec<Property>,
}

impl Record {
    /// Creates an empty record of the given block type.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into().to_ascii_uppercase(),
            properties: Vec::new(),
        }
    }

    /// Block type, e.g. `VCARD` or `VEVENT`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn push(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Adds a parameterless property.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.push(Property {
            name: name.to_ascii_uppercase(),
            params: Vec::new(),
            value: value.to_string(),
        });
        self
    }

    /// Returns the value of the first property with this name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).next()
    }

    /// Returns every value of the named property, in source order.
    pub fn values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
    }
}
