use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kinds of knobs (user-editable parameters) a node can carry.
///
/// This is the closed set of type identifiers understood by the knob
/// factory. Persisted documents store the string tag, so a document written
/// by a newer release may carry tags outside this set; `from_str` returns
/// `None` for those and the loader skips the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnobKind {
    Int,
    Bool,
    Double,
    Choice,
    Color,
    String,
    File,
    OutputFile,
    Path,
    Layers,
    Parametric,
    Button,
    Separator,
    Group,
    Page,
}

impl KnobKind {
    /// Returns the persisted string tag of this knob kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnobKind::Int => "int",
            KnobKind::Bool => "bool",
            KnobKind::Double => "double",
            KnobKind::Choice => "choice",
            KnobKind::Color => "color",
            KnobKind::String => "string",
            KnobKind::File => "file",
            KnobKind::OutputFile => "output_file",
            KnobKind::Path => "path",
            KnobKind::Layers => "layers",
            KnobKind::Parametric => "parametric",
            KnobKind::Button => "button",
            KnobKind::Separator => "separator",
            KnobKind::Group => "group",
            KnobKind::Page => "page",
        }
    }

    /// Parses a persisted tag into a `KnobKind`, returning `None` for
    /// unrecognized values.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<KnobKind> {
        match s {
            "int" => Some(KnobKind::Int),
            "bool" => Some(KnobKind::Bool),
            "double" => Some(KnobKind::Double),
            "choice" => Some(KnobKind::Choice),
            "color" => Some(KnobKind::Color),
            "string" => Some(KnobKind::String),
            "file" => Some(KnobKind::File),
            "output_file" => Some(KnobKind::OutputFile),
            "path" => Some(KnobKind::Path),
            "layers" => Some(KnobKind::Layers),
            "parametric" => Some(KnobKind::Parametric),
            "button" => Some(KnobKind::Button),
            "separator" => Some(KnobKind::Separator),
            "group" => Some(KnobKind::Group),
            "page" => Some(KnobKind::Page),
            _ => None,
        }
    }
}

/// Value held by one dimension of a knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KnobValue {
    Int(i64),
    Bool(bool),
    Double(f64),
    Text(String),
}

impl KnobValue {
    /// Returns the default value a freshly populated knob of `kind` holds in
    /// each dimension.
    ///
    /// Kinds that organize rather than store (separator, page) get an inert
    /// empty text; a group stores its opened state as a bool.
    pub fn default_for(kind: KnobKind) -> KnobValue {
        match kind {
            KnobKind::Int | KnobKind::Choice => KnobValue::Int(0),
            KnobKind::Bool | KnobKind::Button | KnobKind::Group => KnobValue::Bool(false),
            KnobKind::Double | KnobKind::Color | KnobKind::Parametric => KnobValue::Double(0.0),
            KnobKind::String
            | KnobKind::File
            | KnobKind::OutputFile
            | KnobKind::Path
            | KnobKind::Layers
            | KnobKind::Separator
            | KnobKind::Page => KnobValue::Text(String::new()),
        }
    }
}

/// Sentinel stored in `MasterLink::master_dimension` when no link exists.
pub const NO_MASTER_DIMENSION: i32 = -1;

/// Persisted descriptor of one dimension's master link.
///
/// `master_dimension == -1` if and only if the dimension is not linked; the
/// name fields are empty in that case. A non-empty `master_track_name` means
/// the master knob lives on a tracking marker of `master_node_name` rather
/// than on the node itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterLink {
    pub master_dimension: i32,
    pub master_knob_name: String,
    pub master_node_name: String,
    pub master_track_name: String,
}

impl MasterLink {
    /// Descriptor for an unlinked dimension.
    pub fn none() -> MasterLink {
        MasterLink {
            master_dimension: NO_MASTER_DIMENSION,
            master_knob_name: String::new(),
            master_node_name: String::new(),
            master_track_name: String::new(),
        }
    }

    /// Returns `true` if this descriptor records an actual link.
    pub fn is_linked(&self) -> bool {
        self.master_dimension != NO_MASTER_DIMENSION
    }
}

impl Default for MasterLink {
    fn default() -> Self {
        MasterLink::none()
    }
}

/// Old script name to new script name.
///
/// When a save/load cycle involves duplication (copy-paste of nodes), the
/// pasted nodes are renamed to keep script names unique. The rename table is
/// consulted by both link resolution and expression rewriting; a name absent
/// from the table is unchanged.
pub type NameMap = HashMap<String, String>;
