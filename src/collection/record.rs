/// A scraped record that can report its fields by name
///
/// Implementors return `None` for a field they do not carry, which lets a
/// [`Collection`](super::Collection) project attributes across records
/// without knowing their concrete type.
pub trait Record {
    /// Names of the fields this record type carries, in tuple order
    const FIELDS: &'static [&'static str];

    /// Returns the named field, or `None` if this record lacks it
    fn field(&self, name: &str) -> Option<&str>;
}
