//! Takeout ZIP extraction and data-file discovery.

use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::{ServiceError, ServiceResult};

const SCRATCH_PREFIX: &str = "takeout_";

/// Data categories found in a Takeout export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataCategory {
    Contacts,
    Calendar,
    Location,
}

impl DataCategory {
    pub const ALL: [Self; 3] = [Self::Contacts, Self::Calendar, Self::Location];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Calendar => "calendar",
            Self::Location => "location",
        }
    }

    /// Name of the Turtle file written for this category.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Contacts => "contacts-takeout.ttl",
            Self::Calendar => "events-takeout.ttl",
            Self::Location => "locations-takeout.ttl",
        }
    }

    /// Identifier prefix for entities of this category.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Contacts => "contact-takeout",
            Self::Calendar => "event-takeout",
            Self::Location => "place-takeout",
        }
    }

    /// Provenance string recorded as `dcterms:source`.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::Contacts => "Google Takeout - Contacts",
            Self::Calendar => "Google Takeout - Calendar",
            Self::Location => "Google Takeout - Location History",
        }
    }

    /// Classifies a file by extension and, for JSON, by its directory.
    fn classify(relative: &Path) -> Option<Self> {
        let extension = relative.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "vcf" => Some(Self::Contacts),
            "ics" => Some(Self::Calendar),
            "json" => relative
                .parent()
                .is_some_and(|dir| {
                    dir.to_string_lossy()
                        .to_ascii_lowercase()
                        .contains("location")
                })
                .then_some(Self::Location),
            _ => None,
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data files grouped by category, each list sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFiles {
    pub contacts: Vec<PathBuf>,
    pub calendar: Vec<PathBuf>,
    pub location: Vec<PathBuf>,
}

impl DataFiles {
    #[must_use]
    pub fn get(&self, category: DataCategory) -> &[PathBuf] {
        match category {
            DataCategory::Contacts => &self.contacts,
            DataCategory::Calendar => &self.calendar,
            DataCategory::Location => &self.location,
        }
    }

    fn get_mut(&mut self, category: DataCategory) -> &mut Vec<PathBuf> {
        match category {
            DataCategory::Contacts => &mut self.contacts,
            DataCategory::Calendar => &mut self.calendar,
            DataCategory::Location => &mut self.location,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        DataCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// `(category, file count)` for every category.
    #[must_use]
    pub fn counts(&self) -> [(DataCategory, usize); 3] {
        DataCategory::ALL.map(|c| (c, self.get(c).len()))
    }
}

/// A Takeout archive on disk.
#[derive(Debug, Clone)]
pub struct TakeoutArchive {
    path: PathBuf,
}

impl TakeoutArchive {
    /// ## Summary
    /// Refers to an existing archive file.
    ///
    /// ## Errors
    /// Returns `ServiceError::ArchiveNotFound` if nothing exists at `path`.
    pub fn open(path: impl Into<PathBuf>) -> ServiceResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ServiceError::ArchiveNotFound(path));
        }
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ## Summary
    /// Unpacks the archive into a fresh temporary directory.
    ///
    /// The directory is created inside `scratch` when given, otherwise in
    /// the system temp directory. It is deleted when the returned handle is
    /// dropped, including when extraction itself fails.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidArchive` if the file is not a readable
    /// ZIP archive, or an I/O error if the directory cannot be created.
    #[tracing::instrument(skip(self), fields(archive = %self.path.display()))]
    pub fn extract(&self, scratch: Option<&Path>) -> ServiceResult<ExtractedArchive> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match scratch {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };

        let file = File::open(&self.path).map_err(|source| ServiceError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        let invalid = |source| ServiceError::InvalidArchive {
            path: self.path.clone(),
            source,
        };
        let mut zip = ZipArchive::new(file).map_err(invalid)?;
        zip.extract(dir.path()).map_err(invalid)?;

        tracing::debug!(dir = %dir.path().display(), entries = zip.len(), "Extracted archive");
        Ok(ExtractedArchive { dir })
    }
}

/// Extracted archive contents. Removed from disk on drop.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
}

impl ExtractedArchive {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// ## Summary
    /// Walks the extracted tree and groups recognised data files.
    ///
    /// ## Errors
    /// Returns an I/O error if a directory cannot be listed.
    pub fn discover(&self) -> ServiceResult<DataFiles> {
        let root = self.dir.path();
        let mut files = DataFiles::default();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                let relative = path.strip_prefix(root).unwrap_or(&path);
                if let Some(category) = DataCategory::classify(relative) {
                    files.get_mut(category).push(path);
                }
            }
        }

        for category in DataCategory::ALL {
            files.get_mut(category).sort();
        }
        Ok(files)
    }

    /// Removes the directory now, reporting failures instead of ignoring them.
    ///
    /// ## Errors
    /// Returns an I/O error if the directory cannot be removed.
    pub fn close(self) -> ServiceResult<()> {
        Ok(self.dir.close()?)
    }
}
