/// Options controlling a schema create-or-update request.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum::schema::{only_create, CreateOptions};
///
/// // Fail if the collection already has a schema
/// let options = only_create();
///
/// // Create or evolve
/// let options = CreateOptions::default();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateOptions {
    only_create: bool,
}

impl CreateOptions {
    /// Creates `CreateOptions`.
    ///
    /// # Arguments
    ///
    /// * `only_create` - If true, an existing schema makes the request fail
    ///   instead of being evolved
    pub fn new(only_create: bool) -> Self {
        Self { only_create }
    }

    pub fn is_only_create(&self) -> bool {
        self.only_create
    }
}

/// Creates `CreateOptions` that refuse to touch an existing collection.
pub fn only_create() -> CreateOptions {
    CreateOptions::new(true)
}
