//! Known color-space names and their channel counts.
//!
//! The registry is a plain value: callers build one (usually with
//! [`ColorSpaceRegistry::default`]), extend it if needed, and pass it to
//! [`Array::assign_color_space`]. Only names and channel counts are tracked;
//! converting between spaces is left to other crates.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::array::Array;
use crate::error::{ArrayError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSpaceRegistry {
    channels: BTreeMap<String, usize>,
    aliases: BTreeMap<String, String>,
}

impl Default for ColorSpaceRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (name, channels) in [
            ("sRGB", 3),
            ("CMY", 3),
            ("CMYK", 4),
            ("HSI", 3),
            ("ICH", 3),
            ("ISH", 3),
            ("HCV", 3),
            ("HSV", 3),
            ("XYZ", 3),
            ("Yxy", 3),
            ("Lab", 3),
            ("Luv", 3),
            ("LCH", 3),
        ] {
            registry.channels.insert(name.to_string(), channels);
        }
        for (alias, name) in [("RGB", "sRGB"), ("L*a*b*", "Lab"), ("L*u*v*", "Luv")] {
            registry.aliases.insert(alias.to_string(), name.to_string());
        }
        registry
    }
}

impl ColorSpaceRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self {
            channels: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }

    /// Adds (or redefines) a color space.
    pub fn register(&mut self, name: impl Into<String>, channels: usize) -> Result<()> {
        let name = name.into();
        if channels < 3 {
            return Err(ArrayError::InvalidState(format!(
                "color space '{name}' must have at least 3 channels, got {channels}"
            )));
        }
        debug!("ColorSpaceRegistry::register {} channels={}", name, channels);
        self.aliases.remove(&name);
        self.channels.insert(name, channels);
        Ok(())
    }

    /// Makes `alias` resolve to the already registered `name`.
    pub fn register_alias(&mut self, alias: impl Into<String>, name: &str) -> Result<()> {
        let canonical = self.canonical(name)?.to_string();
        self.aliases.insert(alias.into(), canonical);
        Ok(())
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.canonical(name).is_ok()
    }

    /// Canonical spelling of `name`, resolving aliases.
    pub fn canonical<'a>(&'a self, name: &'a str) -> Result<&'a str> {
        if let Some((key, _)) = self.channels.get_key_value(name) {
            return Ok(key.as_str());
        }
        self.aliases
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ArrayError::InvalidState(format!("unknown color space '{name}'")))
    }

    pub fn channels(&self, name: &str) -> Result<usize> {
        let canonical = self.canonical(name)?;
        self.channels
            .get(canonical)
            .copied()
            .ok_or_else(|| ArrayError::InvalidState(format!("unknown color space '{name}'")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }
}

impl Array {
    /// Tags the array with a registered color space, stored under its
    /// canonical name. The channel count must match the registry entry.
    pub fn assign_color_space(&mut self, name: &str, registry: &ColorSpaceRegistry) -> Result<()> {
        let canonical = registry.canonical(name)?.to_string();
        let expected = registry.channels(&canonical)?;
        if expected != self.channels() {
            return Err(ArrayError::InvalidState(format!(
                "color space '{canonical}' has {expected} channels, array has {}",
                self.channels()
            )));
        }
        self.set_color_space(canonical)
    }
}
