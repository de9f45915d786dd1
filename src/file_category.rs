//! Extension-based classification of directory entries.
//!
//! Every file name maps to exactly one [`Destination`]: a top-level
//! [`Category`] directory, optionally followed by a [`Subcategory`].
//! Lookups go through a fixed table built once per process; anything the
//! table does not know lands in [`Category::Misc`].
//!
//! # Examples
//!
//! ```
//! use sortdir::file_category::{classify, Category, Destination, Subcategory};
//!
//! assert_eq!(classify("photo.JPG"), Destination::category(Category::Images));
//! assert_eq!(classify("model.blend"), Destination::sub(Subcategory::Blender));
//! assert_eq!(classify("notes"), Destination::category(Category::Misc));
//! ```
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Extension used by image metadata sidecar files.
pub const SIDECAR_EXTENSION: &str = "xmp";

/// A top-level destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// 3D scenes and meshes
    ThreeD,
    Audio,
    Archives,
    /// Source code and serialized data
    Code,
    Documents,
    Images,
    /// Catch-all for anything unclassified
    Misc,
    Videos,
}

impl Category {
    /// Every category, in directory-name order.
    pub const ALL: [Category; 8] = [
        Category::ThreeD,
        Category::Audio,
        Category::Archives,
        Category::Code,
        Category::Documents,
        Category::Images,
        Category::Misc,
        Category::Videos,
    ];

    /// Returns the directory name for this category.
    ///
    /// ```
    /// use sortdir::file_category::Category;
    ///
    /// assert_eq!(Category::ThreeD.dir_name(), "3D");
    /// assert_eq!(Category::Misc.dir_name(), "Misc");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::ThreeD => "3D",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Misc => "Misc",
            Category::Videos => "Videos",
        }
    }

    /// Looks up a category by its exact directory name.
    ///
    /// Matching is case-sensitive: `images` is an ordinary entry, `Images` is
    /// an already-organized category directory.
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.dir_name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A second-level destination nested under a fixed [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subcategory {
    Blender,
    Maya,
    Assembly,
    CCpp,
    Javascript,
    Python,
    Shell,
    Raw,
}

impl Subcategory {
    /// Returns the category this subcategory lives under.
    pub const fn parent(&self) -> Category {
        match self {
            Subcategory::Blender | Subcategory::Maya => Category::ThreeD,
            Subcategory::Assembly
            | Subcategory::CCpp
            | Subcategory::Javascript
            | Subcategory::Python
            | Subcategory::Shell => Category::Code,
            Subcategory::Raw => Category::Images,
        }
    }

    /// Returns the directory name for this subcategory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Subcategory::Blender => "Blender",
            Subcategory::Maya => "Maya",
            Subcategory::Assembly => "Assembly",
            Subcategory::CCpp => "C_Cpp",
            Subcategory::Javascript => "Javascript",
            Subcategory::Python => "Python",
            Subcategory::Shell => "Shell",
            Subcategory::Raw => "Raw",
        }
    }
}

/// Where an entry goes, relative to the directory being organized.
///
/// Constructed only through [`Destination::category`] and
/// [`Destination::sub`], so a subcategory always sits under its own parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Destination {
    category: Category,
    subcategory: Option<Subcategory>,
}

impl Destination {
    /// The catch-all destination.
    pub const MISC: Destination = Destination::category(Category::Misc);

    /// A destination directly under a top-level category.
    pub const fn category(category: Category) -> Self {
        Self {
            category,
            subcategory: None,
        }
    }

    /// A destination nested under the subcategory's parent.
    pub const fn sub(subcategory: Subcategory) -> Self {
        Self {
            category: subcategory.parent(),
            subcategory: Some(subcategory),
        }
    }

    pub fn top_level(&self) -> Category {
        self.category
    }

    pub fn subcategory(&self) -> Option<Subcategory> {
        self.subcategory
    }

    /// True for `Images` and `Images/Raw`, the destinations whose entries
    /// carry their sidecar along.
    pub fn is_image(&self) -> bool {
        self.category == Category::Images
    }

    /// Returns the destination as a relative path, e.g. `Code/Python`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(self.category.dir_name());
        if let Some(sub) = self.subcategory {
            path.push(sub.dir_name());
        }
        path
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subcategory {
            Some(sub) => write!(f, "{}/{}", self.category, sub.dir_name()),
            None => write!(f, "{}", self.category),
        }
    }
}

static EXTENSION_TABLE: LazyLock<HashMap<&'static str, Destination>> = LazyLock::new(|| {
    use Category as C;
    use Subcategory as S;

    let mut table = HashMap::new();
    let mut add = |exts: &[&'static str], dest: Destination| {
        for ext in exts {
            table.insert(*ext, dest);
        }
    };

    add(&["abc", "fbx", "obj"], Destination::category(C::ThreeD));
    add(&["blend", "blend1"], Destination::sub(S::Blender));
    add(&["ma", "mb"], Destination::sub(S::Maya));
    add(&["mp3"], Destination::category(C::Audio));
    add(
        &["7z", "aar", "zip", "gz", "xz", "tar", "txz"],
        Destination::category(C::Archives),
    );
    // Serialized data lives with code
    add(&["env", "db", "json", "xml", "yml"], Destination::category(C::Code));
    add(&["s"], Destination::sub(S::Assembly));
    add(&["c", "cc", "cpp", "h", "hh", "hpp"], Destination::sub(S::CCpp));
    add(&["js"], Destination::sub(S::Javascript));
    add(&["py", "pyi"], Destination::sub(S::Python));
    add(&["sh", "bash", "zsh"], Destination::sub(S::Shell));
    add(
        &["txt", "md", "rst", "csv", "tsv", "pdf", "doc", "docx", "xls"],
        Destination::category(C::Documents),
    );
    add(
        &["heic", "jpg", "jpeg", "png", "webp", "tif", "tiff", "psd"],
        Destination::category(C::Images),
    );
    add(&["dng", "orf"], Destination::sub(S::Raw));
    add(&["mkv", "mov", "mp4"], Destination::category(C::Videos));

    table
});

/// Returns the lowercase extension of a file name, or `""` if it has none.
///
/// A leading dot does not start an extension, so `.bashrc` has none, while
/// `archive.tar.gz` has `gz`.
///
/// ```
/// use sortdir::file_category::extension_key;
///
/// assert_eq!(extension_key("Photo.JPG"), "jpg");
/// assert_eq!(extension_key(".bashrc"), "");
/// assert_eq!(extension_key("README"), "");
/// ```
pub fn extension_key(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Looks up an already-lowercased extension key.
pub fn destination_for_extension(key: &str) -> Option<Destination> {
    EXTENSION_TABLE.get(key).copied()
}

/// Classifies a file name. Total: unknown or missing extensions go to `Misc`.
pub fn classify(file_name: &str) -> Destination {
    destination_for_extension(&extension_key(file_name)).unwrap_or(Destination::MISC)
}

/// True if the file name carries the sidecar extension, in any case.
pub fn is_sidecar(file_name: &str) -> bool {
    extension_key(file_name) == SIDECAR_EXTENSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.dir_name()).collect();
        assert_eq!(
            names,
            vec![
                "3D",
                "Audio",
                "Archives",
                "Code",
                "Documents",
                "Images",
                "Misc",
                "Videos"
            ]
        );
    }

    #[test]
    fn test_from_dir_name_is_case_sensitive() {
        assert_eq!(Category::from_dir_name("Images"), Some(Category::Images));
        assert_eq!(Category::from_dir_name("3D"), Some(Category::ThreeD));
        assert_eq!(Category::from_dir_name("images"), None);
        assert_eq!(Category::from_dir_name("Raw"), None);
    }

    #[test]
    fn test_subcategories_nest_under_parent() {
        assert_eq!(
            Destination::sub(Subcategory::Blender).relative_path(),
            PathBuf::from("3D").join("Blender")
        );
        assert_eq!(
            Destination::sub(Subcategory::CCpp).relative_path(),
            PathBuf::from("Code").join("C_Cpp")
        );
        assert_eq!(
            Destination::sub(Subcategory::Raw).relative_path(),
            PathBuf::from("Images").join("Raw")
        );
    }

    #[test]
    fn test_two_level_categories() {
        assert_eq!(classify("model.blend"), Destination::sub(Subcategory::Blender));
        assert_eq!(classify("scene.ma"), Destination::sub(Subcategory::Maya));
        assert_eq!(classify("main.cpp"), Destination::sub(Subcategory::CCpp));
        assert_eq!(classify("boot.s"), Destination::sub(Subcategory::Assembly));
        assert_eq!(classify("run.zsh"), Destination::sub(Subcategory::Shell));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("Photo.JPG"), classify("photo.jpg"));
        assert_eq!(classify("Photo.JPG"), Destination::category(Category::Images));
        assert_eq!(classify("RAW.DNG"), Destination::sub(Subcategory::Raw));
    }

    #[test]
    fn test_fallback_to_misc() {
        assert_eq!(classify("file.xyz123"), Destination::MISC);
        assert_eq!(classify("Makefile"), Destination::MISC);
        assert_eq!(classify(""), Destination::MISC);
        assert_eq!(classify("trailing."), Destination::MISC);
        assert_eq!(classify(".profile"), Destination::MISC);
    }

    #[test]
    fn test_last_extension_wins() {
        assert_eq!(classify("backup.tar.gz"), Destination::category(Category::Archives));
        assert_eq!(classify("v1.2.py"), Destination::sub(Subcategory::Python));
    }

    #[test]
    fn test_every_table_value_is_well_formed() {
        for dest in EXTENSION_TABLE.values() {
            if let Some(sub) = dest.subcategory() {
                assert_eq!(sub.parent(), dest.top_level());
            }
            assert!(Category::from_dir_name(dest.top_level().dir_name()).is_some());
        }
    }

    #[test]
    fn test_sidecar_not_in_table() {
        assert!(destination_for_extension(SIDECAR_EXTENSION).is_none());
        assert!(is_sidecar("photo.xmp"));
        assert!(is_sidecar("photo.XMP"));
        assert!(!is_sidecar("photo.xmp.bak"));
        assert!(!is_sidecar("xmp"));
    }

    #[test]
    fn test_is_image() {
        assert!(Destination::category(Category::Images).is_image());
        assert!(Destination::sub(Subcategory::Raw).is_image());
        assert!(!Destination::MISC.is_image());
        assert!(!Destination::sub(Subcategory::Python).is_image());
    }

    #[test]
    fn test_display() {
        assert_eq!(Destination::sub(Subcategory::Raw).to_string(), "Images/Raw");
        assert_eq!(Destination::category(Category::ThreeD).to_string(), "3D");
    }
}
