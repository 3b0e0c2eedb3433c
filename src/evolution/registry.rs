use crate::error::{Result, TraceModelError};
use crate::evolution::enums::EnumEvolution;
use std::collections::HashMap;

/// Named enumerations with integer stable values, as loaded from configuration
#[derive(Debug, Default)]
pub struct EnumRegistry {
    enums: HashMap<String, EnumEvolution<i64>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumeration under its own name, replacing any previous one
    pub fn insert(&mut self, evolution: EnumEvolution<i64>) -> Option<EnumEvolution<i64>> {
        self.enums.insert(evolution.name().to_string(), evolution)
    }

    pub fn get(&self, name: &str) -> Option<&EnumEvolution<i64>> {
        self.enums.get(name)
    }

    /// Look up an enumeration, failing with a configuration error if unknown
    pub fn require(&self, name: &str) -> Result<&EnumEvolution<i64>> {
        self.get(name).ok_or_else(|| {
            TraceModelError::config(format!("Unknown enumeration '{}'", name))
        })
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enums.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
