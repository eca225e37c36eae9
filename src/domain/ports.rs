/// A record held by a [`crate::infrastructure::Repository`].
pub trait Entity: Send + 'static {
    /// Resource name used in client-facing messages, e.g. `"Dish"`.
    const RESOURCE: &'static str;

    fn id(&self) -> &str;
}

/// Source of fresh identifiers for created entities.
pub trait IdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> String;
}
