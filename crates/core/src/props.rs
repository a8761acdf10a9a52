//! Parsing of the device build configuration (`/system/build.prop`).

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

/// Remote command that prints the build configuration.
pub(crate) const BUILD_PROP_COMMAND: &str = "cat /system/build.prop";

/// Build properties of a device: property name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildProps(HashMap<String, String>);

impl BuildProps {
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn into_inner(self) -> HashMap<String, String> {
		self.0
	}
}

impl<'a> IntoIterator for &'a BuildProps {
	type Item = (&'a String, &'a String);
	type IntoIter = std::collections::hash_map::Iter<'a, String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Parse `key=value` lines into [`BuildProps`].
///
/// Each non-empty line is split on its first `=`. Keys starting with `#` are
/// comments. Lines without `=` are skipped with a warning. A repeated key
/// keeps its last value.
pub fn parse_build_props(raw: &str) -> BuildProps {
	let mut props = HashMap::new();

	for (index, line) in raw.lines().enumerate() {
		if line.is_empty() {
			continue;
		}

		let Some((key, value)) = line.split_once('=') else {
			warn!(target = "andropy", line = index + 1, content = line, "skipping build property line without '='");
			continue;
		};

		if key.starts_with('#') {
			continue;
		}

		props.insert(key.to_string(), value.to_string());
	}

	BuildProps(props)
}
