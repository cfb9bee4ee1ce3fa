use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use chrono::Utc;
use log::info;
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::data::model::Document;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("failed to read '{path}': {message}")]
	Read { path: PathBuf, message: String },
	#[error("'{path}' is not a valid planner document: {message}")]
	Parse { path: PathBuf, message: String },
	#[error("failed to write '{path}': {message}")]
	Write { path: PathBuf, message: String },
}

/// Reads the document at `path`.
///
/// An absent or unreadable file never fails the caller: the planner starts
/// from an empty document instead.
pub fn load_document(path: &Path) -> Document {
	let bytes = match std::fs::read(path) {
		Ok(bytes) => bytes,
		Err(err) => {
			if err.kind() != std::io::ErrorKind::NotFound {
				warn!("could not read '{}': {err}", path.display());
			}
			return Document::default();
		}
	};
	match serde_json::from_slice(&bytes) {
		Ok(doc) => doc,
		Err(err) => {
			warn!(
				"ignoring unparsable document '{}': {err}",
				path.display()
			);
			Document::default()
		}
	}
}

/// Serializes the full document and overwrites `path`. No partial update, no
/// merge. Stamps `lastUpdate` with the current time as a side effect.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), StoreError> {
	doc.last_update = Some(Utc::now());
	let json = serde_json::to_string(doc).map_err(|err| StoreError::Write {
		path: path.to_path_buf(),
		message: err.to_string(),
	})?;
	std::fs::write(path, json).map_err(|err| StoreError::Write {
		path: path.to_path_buf(),
		message: err.to_string(),
	})
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'d> {
	#[serde(flatten)]
	document: &'d Document,
	export_date: DateTime<Utc>,
}

/// Writes a pretty-printed backup named after today's date into `dir` and
/// returns its path.
pub fn export_document(doc: &Document, dir: &Path) -> Result<PathBuf, StoreError> {
	let path = dir.join(format!("dayk-backup-{}.json", Local::now().format("%Y-%m-%d")));
	let export = Export {
		document: doc,
		export_date: Utc::now(),
	};
	let json = serde_json::to_string_pretty(&export).map_err(|err| StoreError::Write {
		path: path.clone(),
		message: err.to_string(),
	})?;
	std::fs::write(&path, json).map_err(|err| StoreError::Write {
		path: path.clone(),
		message: err.to_string(),
	})?;
	info!("exported backup to '{}'", path.display());
	Ok(path)
}

/// Parses a user-selected backup. Absent collections default to empty, same
/// leniency as [`load_document`]; anything else is a parse error and the
/// caller's state stays untouched.
pub fn import_document(path: &Path) -> Result<Document, StoreError> {
	let bytes = std::fs::read(path).map_err(|err| StoreError::Read {
		path: path.to_path_buf(),
		message: err.to_string(),
	})?;
	serde_json::from_slice(&bytes).map_err(|err| StoreError::Parse {
		path: path.to_path_buf(),
		message: err.to_string(),
	})
}
