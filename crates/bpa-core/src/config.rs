use std::path::PathBuf;

/// URL of the packaged inspector archive (platform-specific zip).
pub const INSPECTOR_ARCHIVE_URL: &str =
    "https://github.com/NatVanG/PBI-InspectorV2/releases/latest/download/win-x64-CLI.zip";

/// URL of the default BPA rule document, used when no local rule file exists.
pub const DEFAULT_RULES_URL: &str =
    "https://raw.githubusercontent.com/NatVanG/PBI-InspectorV2/main/Rules/Base-rules.json";

/// Glob selecting report container folders when the caller gives none.
pub const DEFAULT_SOURCE_GLOB: &str = "./../src/*.Report";

const INSPECTOR_EXE: &str = "PBIXInspectorCLI.exe";
const RULES_FILE: &str = "bpa-report-rules.json";

/// Configuration for one run.
///
/// The working root is an explicit value threaded through every component;
/// no process-wide working-directory change happens anywhere.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Working root under which tools and rules are provisioned.
    pub root: PathBuf,

    /// Glob selecting report container folders, resolved against `root`.
    pub source_glob: String,

    /// Where the inspector archive is fetched from when missing.
    pub archive_url: String,

    /// Where the default rule document is fetched from when missing.
    pub rules_url: String,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source_glob: DEFAULT_SOURCE_GLOB.to_string(),
            archive_url: INSPECTOR_ARCHIVE_URL.to_string(),
            rules_url: DEFAULT_RULES_URL.to_string(),
        }
    }

    pub fn with_source_glob(mut self, source_glob: impl Into<String>) -> Self {
        self.source_glob = source_glob.into();
        self
    }

    /// Directory the inspector archive is unpacked into.
    pub fn tools_dir(&self) -> PathBuf {
        self.root.join("_tools").join("PBIInspector")
    }

    /// Expected path of the provisioned inspector executable.
    pub fn inspector_path(&self) -> PathBuf {
        self.tools_dir().join("win-x64").join("CLI").join(INSPECTOR_EXE)
    }

    /// Rule file looked for first, alongside the source tree.
    pub fn expected_rules_path(&self) -> PathBuf {
        self.root.join(RULES_FILE)
    }

    /// Where a downloaded default rule set lands.
    pub fn fallback_rules_path(&self) -> PathBuf {
        self.tools_dir().join(RULES_FILE)
    }
}
