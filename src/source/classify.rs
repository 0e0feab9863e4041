use std::fmt;

/// The file roles that make up a Debian source package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactRole {
    /// The `.dsc` description file naming the package's constituent files
    Description,

    /// The pristine upstream tarball (`.orig.tar.xz` / `.orig.tar.gz`)
    Orig,

    /// The packaging and patches tarball (`.debian.tar.xz`)
    Debian,
}

impl ArtifactRole {
    /// Order in which present artifacts are downloaded
    pub const FETCH_ORDER: [ArtifactRole; 3] = [Self::Description, Self::Debian, Self::Orig];

    /// Returns the file suffixes that identify this role
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Self::Description => &[".dsc"],
            Self::Orig => &[".orig.tar.xz", ".orig.tar.gz"],
            Self::Debian => &[".debian.tar.xz"],
        }
    }

    /// Classifies an href by its suffix
    ///
    /// The suffix sets are disjoint, so an href matches at most one role.
    /// Returns `None` for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// use dpkg_builder::ArtifactRole;
    ///
    /// assert_eq!(ArtifactRole::classify("hello_2.10-2.dsc"), Some(ArtifactRole::Description));
    /// assert_eq!(ArtifactRole::classify("hello_2.10.orig.tar.gz"), Some(ArtifactRole::Orig));
    /// assert_eq!(ArtifactRole::classify("changelog"), None);
    /// ```
    pub fn classify(href: &str) -> Option<Self> {
        [Self::Description, Self::Orig, Self::Debian]
            .into_iter()
            .find(|role| role.suffixes().iter().any(|suffix| href.ends_with(suffix)))
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Description => "description",
            Self::Orig => "orig",
            Self::Debian => "debian",
        };
        write!(f, "{}", s)
    }
}
