//! The font database the cosmic-text engine shapes against.

use std::path::Path;

use crate::logging::targets;

const FALLBACK_LOCALE: &str = "en-US";

/// Options for building a [`FontSystem`].
#[derive(Debug, Clone)]
pub struct FontSystemConfig {
    /// Scan the platform font directories. Off gives an empty database.
    pub load_system_fonts: bool,
    /// BCP 47 locale used for fallback selection while shaping.
    pub locale: String,
    /// Family resolved for [`FontFamily::System`](super::FontFamily::System).
    pub sans_serif_family: Option<String>,
    pub monospace_family: Option<String>,
}

impl Default for FontSystemConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            locale: sys_locale::get_locale().unwrap_or_else(|| FALLBACK_LOCALE.to_owned()),
            sans_serif_family: None,
            monospace_family: None,
        }
    }
}

impl FontSystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_system_fonts(self, load_system_fonts: bool) -> Self {
        Self {
            load_system_fonts,
            ..self
        }
    }

    pub fn locale(self, locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..self
        }
    }

    pub fn sans_serif_family(self, family: impl Into<String>) -> Self {
        Self {
            sans_serif_family: Some(family.into()),
            ..self
        }
    }

    pub fn monospace_family(self, family: impl Into<String>) -> Self {
        Self {
            monospace_family: Some(family.into()),
            ..self
        }
    }

    fn build_database(&self) -> fontdb::Database {
        let mut db = fontdb::Database::new();
        if self.load_system_fonts {
            db.load_system_fonts();
        }
        if let Some(family) = &self.sans_serif_family {
            db.set_sans_serif_family(family.as_str());
        }
        if let Some(family) = &self.monospace_family {
            db.set_monospace_family(family.as_str());
        }
        db
    }
}

/// Failure to add fonts to a [`FontSystem`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum FontLoadError {
    #[error("failed to read font file: {0}")]
    IoError(String),
    #[error("no usable font face: {0}")]
    InvalidFormat(String),
}

/// Font database plus shaping caches, owned by a
/// [`CosmicEngine`](super::CosmicEngine).
///
/// `FontSystem` is `Send` but not `Sync`; labels keep their engine behind a
/// mutex.
///
/// # Example
///
/// ```no_run
/// use taplabel_text::text::{FontSystem, FontSystemConfig};
///
/// // Scans installed fonts.
/// let installed = FontSystem::new();
///
/// let empty = FontSystem::with_config(FontSystemConfig::new().load_system_fonts(false));
/// assert_eq!(empty.face_count(), 0);
/// ```
pub struct FontSystem {
    inner: cosmic_text::FontSystem,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::with_config(FontSystemConfig::default())
    }

    pub fn with_config(config: FontSystemConfig) -> Self {
        let db = config.build_database();
        let inner = cosmic_text::FontSystem::new_with_locale_and_db(config.locale.clone(), db);
        let font_system = Self { inner };
        tracing::debug!(
            target: targets::FONT,
            locale = %config.locale,
            face_count = font_system.face_count(),
            "font system created"
        );
        font_system
    }

    pub(crate) fn inner_mut(&mut self) -> &mut cosmic_text::FontSystem {
        &mut self.inner
    }

    pub fn database(&self) -> &fontdb::Database {
        self.inner.db()
    }

    /// Adds every face found in the file at `path`.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<(), FontLoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|err| FontLoadError::IoError(format!("{}: {err}", path.display())))?;
        self.load_font_data(data)?;
        tracing::debug!(target: targets::FONT, path = %path.display(), "font file loaded");
        Ok(())
    }

    /// Adds every face in a TTF, OTF or collection held in memory.
    ///
    /// Fails when the data contains no face the database can parse.
    pub fn load_font_data(&mut self, data: Vec<u8>) -> Result<(), FontLoadError> {
        let len = data.len();
        let before = self.face_count();
        self.inner.db_mut().load_font_data(data);
        match self.face_count() - before {
            0 => Err(FontLoadError::InvalidFormat(format!("{len} bytes"))),
            added => {
                tracing::debug!(target: targets::FONT, added, "font data loaded");
                Ok(())
            }
        }
    }

    pub fn face_count(&self) -> usize {
        self.database().len()
    }

    /// Whether any loaded face lists `family` among its names.
    pub fn has_family(&self, family: &str) -> bool {
        self.database()
            .faces()
            .flat_map(|face| face.families.iter())
            .any(|(name, _)| name == family)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSystem")
            .field("locale", &self.inner.locale())
            .field("face_count", &self.face_count())
            .finish()
    }
}
