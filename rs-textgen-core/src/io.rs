use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{Result, TextGenError};

/// Lazily streams the lines of every regular file directly inside a
/// directory.
///
/// - Files are visited in name order; subdirectories are ignored
/// - Each file is opened only when the previous one is exhausted
pub struct DirectoryLines {
	pending: VecDeque<PathBuf>,
	current: Option<(PathBuf, Lines<BufReader<File>>)>,
}

impl DirectoryLines {
	/// Lists the files of `dir`.
	///
	/// # Errors
	/// `Io` if the directory cannot be read.
	pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let dir = dir.as_ref();
		log::info!("scanning directory {} ...", dir.display());
		let context = || format!("scanning directory {}", dir.display());

		let mut files = Vec::new();
		for entry in fs::read_dir(dir).map_err(|e| TextGenError::io(context(), e))? {
			let path = entry.map_err(|e| TextGenError::io(context(), e))?.path();
			if path.is_file() {
				files.push(path);
			}
		}
		files.sort();

		Ok(Self { pending: files.into(), current: None })
	}

	fn open_next(&mut self) -> Option<Result<()>> {
		let path = self.pending.pop_front()?;
		log::info!("\tparsing {} ...", file_name(&path));
		Some(match File::open(&path) {
			Ok(file) => {
				self.current = Some((path, BufReader::new(file).lines()));
				Ok(())
			}
			Err(e) => Err(TextGenError::io(format!("opening {}", path.display()), e)),
		})
	}
}

impl Iterator for DirectoryLines {
	type Item = Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some((path, lines)) = &mut self.current {
				match lines.next() {
					Some(Ok(line)) => return Some(Ok(line)),
					Some(Err(e)) => {
						let err = TextGenError::io(format!("reading {}", path.display()), e);
						self.current = None;
						return Some(Err(err));
					}
					None => self.current = None,
				}
			}
			if let Err(e) = self.open_next()? {
				return Some(Err(e));
			}
		}
	}
}

/// Lazily streams the lines of standard input.
pub fn stdin_lines() -> impl Iterator<Item = Result<String>> {
	log::info!("getting data from stdin ...");
	io::stdin().lines().map(|line| line.map_err(|e| TextGenError::io("reading stdin", e)))
}

/// Lists the names of the files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let dir = dir.as_ref();
	let context = || format!("listing {}", dir.display());
	let mut files = Vec::new();

	for entry in fs::read_dir(dir).map_err(|e| TextGenError::io(context(), e))? {
		let path = entry.map_err(|e| TextGenError::io(context(), e))?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(file_name(&path));
		}
	}

	files.sort();
	Ok(files)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/model.bin"` → `"model"`
/// - `"model.bin"` → `"model"`
pub fn model_name<P: AsRef<Path>>(path: P) -> Result<String> {
	let stem = path.as_ref().file_stem().ok_or_else(|| {
		TextGenError::io(
			format!("naming {}", path.as_ref().display()),
			io::Error::new(io::ErrorKind::InvalidInput, "path has no filename"),
		)
	})?;
	Ok(stem.to_string_lossy().to_string())
}

fn file_name(path: &Path) -> String {
	path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
}
