/// Operating system assumed for tables that appear before any `#### <os>` heading.
pub const DEFAULT_OS: &str = "Linux x86_64";

// Column labels shared by the History tables and the rendered catalog.
pub const COMPONENT_LABEL: &str = "Flash-Attention";
pub const RUNTIME_LABEL: &str = "Python";
pub const FRAMEWORK_LABEL: &str = "PyTorch";
pub const TOOLKIT_LABEL: &str = "CUDA";

/// One (component, runtime, framework, toolkit, OS) combination seen in a
/// release log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PackageRecord {
    /// Flash-Attention version (e.g., "2.7.4")
    pub component_version: String,
    /// Python version (e.g., "3.11")
    pub runtime_version: String,
    /// PyTorch version (e.g., "2.6")
    pub framework_version: String,
    /// CUDA version (e.g., "12.4")
    pub toolkit_version: String,
    /// Display name of the platform (e.g., "Linux x86_64")
    pub os_name: String,
    /// Release page this record was published under
    pub link: Option<String>,
}

impl PackageRecord {
    pub fn identity(&self) -> IdentityKey {
        IdentityKey {
            component_version: self.component_version.clone(),
            runtime_version: self.runtime_version.clone(),
            framework_version: self.framework_version.clone(),
            toolkit_version: self.toolkit_version.clone(),
            os_name: self.os_name.clone(),
        }
    }
}

/// The five fields that define a unique catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub component_version: String,
    pub runtime_version: String,
    pub framework_version: String,
    pub toolkit_version: String,
    pub os_name: String,
}

/// A catalog row: one identity with every distinct release link that
/// published it, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedEntry {
    pub key: IdentityKey,
    pub links: Vec<String>,
}

impl AggregatedEntry {
    pub fn new(key: IdentityKey) -> Self {
        Self {
            key,
            links: Vec::new(),
        }
    }
}
