use std::collections::HashMap;

/// Read-only view over environment variables consulted during profile resolution.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the trimmed value of `name`, treating empty values as unset.
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Reads the live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables, used by tests and by callers that snapshot the environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnv {
    fn from(entries: [(&str, &str); N]) -> Self {
        entries
            .into_iter()
            .fold(MapEnv::new(), |env, (name, value)| env.with(name, value))
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
