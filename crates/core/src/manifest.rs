//! The `.projekts` manifest: one archive file name per discovered project.

use std::path::Path;

use tracing::info;

use crate::config::TeamId;
use crate::error::{Error, Result};
use crate::site::{ARCHIVE_SUFFIX, Site};
use crate::steps::DiscoveredLink;

/// Archive file name for `link`: the link with the leading `prefix` removed,
/// plus the archive suffix.
///
/// Only a leading `prefix` is removed. A link that does not start with it is
/// kept whole.
pub fn manifest_entry(link: &DiscoveredLink, prefix: &str) -> String {
	let name = link.as_str().strip_prefix(prefix).unwrap_or(link.as_str());
	format!("{name}{ARCHIVE_SUFFIX}")
}

/// One entry per link, in link order.
pub fn manifest_entries(links: &[DiscoveredLink], site: &Site, team: &TeamId) -> Vec<String> {
	let prefix = site.project_prefix(team);
	links.iter().map(|link| manifest_entry(link, &prefix)).collect()
}

/// Writes `entries` newline-separated, without a trailing newline, replacing
/// any existing file.
pub fn write_manifest(path: &Path, entries: &[String]) -> Result<()> {
	std::fs::write(path, entries.join("\n")).map_err(|source| Error::Manifest {
		path: path.to_path_buf(),
		source,
	})?;
	info!(target = "projekt.manifest", path = %path.display(), entries = entries.len(), "manifest written");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn acme() -> TeamId {
		TeamId::parse("acme").unwrap()
	}

	#[test]
	fn entries_strip_team_prefix() {
		let links = vec![DiscoveredLink::new("https://replit.com/@acme/a"), DiscoveredLink::new("https://replit.com/@acme/b")];
		assert_eq!(manifest_entries(&links, &Site::default(), &acme()), vec!["a.zip", "b.zip"]);
	}

	#[test]
	fn prefix_is_only_removed_at_the_start() {
		let prefix = "https://replit.com/@acme/";
		let nested = DiscoveredLink::new("https://replit.com/@acme/x/https://replit.com/@acme/y");
		assert_eq!(manifest_entry(&nested, prefix), "x/https://replit.com/@acme/y.zip");

		let foreign = DiscoveredLink::new("https://mirror.test/@acme/z");
		assert_eq!(manifest_entry(&foreign, prefix), "https://mirror.test/@acme/z.zip");
	}

	#[test]
	fn written_file_has_no_trailing_newline() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(".projekts");

		write_manifest(&path, &["a.zip".to_string(), "b.zip".to_string()]).unwrap();
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "a.zip\nb.zip");

		write_manifest(&path, &[]).unwrap();
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
	}

	#[test]
	fn unwritable_path_is_manifest_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing").join(".projekts");

		let err = write_manifest(&path, &["a.zip".to_string()]).unwrap_err();
		assert!(matches!(err, Error::Manifest { .. }));
	}
}
