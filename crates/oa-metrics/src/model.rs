use std::fmt;

/// Register program category of a config block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterCategory {
    /// Counter-routing multiplexer (mux) programming.
    Noa,
    /// Boolean/event counter programming.
    Oa,
    /// Flexible EU counter programming.
    Flex,
}

impl RegisterCategory {
    /// All categories in emission order.
    pub const ALL: [Self; 3] = [Self::Noa, Self::Oa, Self::Flex];

    /// Decodes the `type` attribute text.
    #[must_use]
    pub fn from_attr(text: &str) -> Option<Self> {
        match text {
            "NOA" => Some(Self::Noa),
            "OA" => Some(Self::Oa),
            "FLEX" => Some(Self::Flex),
            _ => None,
        }
    }

    /// Attribute text for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noa => "NOA",
            Self::Oa => "OA",
            Self::Flex => "FLEX",
        }
    }
}

impl fmt::Display for RegisterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterEntry {
    /// MMIO register offset.
    pub address: u32,
    /// Value written to the register.
    pub value: u32,
    /// Category declared by the register element.
    pub category: RegisterCategory,
}

/// An ordered register program of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterConfigBlock {
    /// Category asserted by the block.
    pub category: RegisterCategory,
    /// Config id (`"0"` when absent).
    pub id: String,
    /// Config priority (`"0"` when absent).
    pub priority: String,
    /// Availability equation, carried verbatim and never evaluated.
    pub availability: Option<String>,
    /// Register writes in program order.
    pub entries: Vec<RegisterEntry>,
}

impl RegisterConfigBlock {
    /// Creates an empty block, used for absent optional categories.
    #[must_use]
    pub fn empty(category: RegisterCategory) -> Self {
        Self {
            category,
            id: "0".to_string(),
            priority: "0".to_string(),
            availability: None,
            entries: Vec::new(),
        }
    }

    /// Returns true when the block programs no registers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of register writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Target chipset identifier, normalized once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chipset {
    upper: String,
    lower: String,
}

impl Chipset {
    /// Haswell has no test config; its default set is `RenderBasic`.
    pub const HASWELL: &'static str = "HSW";

    /// Normalizes a chipset name given on the command line in any case.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        Self {
            upper: trimmed.to_ascii_uppercase(),
            lower: trimmed.to_ascii_lowercase(),
        }
    }

    /// Upper-case form, used for comparisons against `set` elements.
    #[must_use]
    pub fn upper(&self) -> &str {
        &self.upper
    }

    /// Lower-case form, used in generated symbols and hash derivation.
    #[must_use]
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Name of the only set generated when no whitelist is supplied.
    #[must_use]
    pub fn default_set_name(&self) -> &'static str {
        if self.upper == Self::HASWELL {
            "RenderBasic"
        } else {
            "TestOa"
        }
    }
}

impl fmt::Display for Chipset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.upper)
    }
}

/// Attribute text of a `register` element, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRegister {
    /// `type` attribute.
    pub category: Option<String>,
    /// `address` attribute.
    pub address: Option<String>,
    /// `value` attribute.
    pub value: Option<String>,
}

/// A `register_config` element as written in the document.
///
/// Decoding into a [`RegisterConfigBlock`] is deferred until the owning set
/// has survived selection, so malformed sets that are filtered out never
/// abort a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRegisterConfig {
    /// `type` attribute.
    pub category: Option<String>,
    /// `id` attribute.
    pub id: Option<String>,
    /// `priority` attribute.
    pub priority: Option<String>,
    /// `availability` attribute.
    pub availability: Option<String>,
    /// Register children in source order.
    pub registers: Vec<RawRegister>,
}

/// A candidate metric set as extracted from a `set` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSetSource {
    /// `symbol_name` attribute, the identity used for selection.
    pub symbol_name: String,
    /// Human readable `name` attribute (falls back to the symbol name).
    pub display_name: String,
    /// Undecoded register configs in source order.
    pub configs: Vec<RawRegisterConfig>,
}

/// A validated metric set with its resolved GUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
    /// Symbol name of the set.
    pub name: String,
    /// Lower-case chipset, used in generated symbols.
    pub chipset_lower: String,
    /// Symbol-safe lower-case name (`test_oa`).
    pub perf_name_lc: String,
    /// Upper-case form of [`Self::perf_name_lc`].
    pub perf_name: String,
    /// GUID assigned by the registry.
    pub guid: String,
    /// Content hash the GUID was resolved from.
    pub hw_config_hash: String,
    /// Mux register program (always present).
    pub noa: RegisterConfigBlock,
    /// Boolean counter program, empty when the set declares none.
    pub oa: RegisterConfigBlock,
    /// Flex EU program, empty when the set declares none.
    pub flex: RegisterConfigBlock,
}

impl MetricSet {
    /// Returns the block of the given category.
    #[must_use]
    pub const fn block(&self, category: RegisterCategory) -> &RegisterConfigBlock {
        match category {
            RegisterCategory::Noa => &self.noa,
            RegisterCategory::Oa => &self.oa,
            RegisterCategory::Flex => &self.flex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_attr_roundtrip() {
        for category in RegisterCategory::ALL {
            assert_eq!(RegisterCategory::from_attr(category.as_str()), Some(category));
        }
    }

    #[test]
    fn category_attr_is_case_sensitive() {
        assert_eq!(RegisterCategory::from_attr("noa"), None);
        assert_eq!(RegisterCategory::from_attr("MUX"), None);
        assert_eq!(RegisterCategory::from_attr(""), None);
    }

    #[test]
    fn chipset_normalizes_case() {
        let chipset = Chipset::new("sklgt2");
        assert_eq!(chipset.upper(), "SKLGT2");
        assert_eq!(chipset.lower(), "sklgt2");
        assert_eq!(chipset.to_string(), "SKLGT2");
    }

    #[test]
    fn haswell_defaults_to_render_basic() {
        assert_eq!(Chipset::new("hsw").default_set_name(), "RenderBasic");
        assert_eq!(Chipset::new("BDW").default_set_name(), "TestOa");
        assert_eq!(Chipset::new("HSWX").default_set_name(), "TestOa");
    }

    #[test]
    fn empty_block_uses_default_identity() {
        let block = RegisterConfigBlock::empty(RegisterCategory::Oa);
        assert!(block.is_empty());
        assert_eq!(block.len(), 0);
        assert_eq!(block.id, "0");
        assert_eq!(block.priority, "0");
        assert_eq!(block.availability, None);
    }
}
