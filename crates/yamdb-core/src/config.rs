/// Configuration loaded from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-case
/// variables (`database_url` ← `DATABASE_URL`).
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of variables instead of the process env.
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
