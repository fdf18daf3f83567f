use crate::errors::ExpressionError;
use crate::expression::ExpressionEngine;
use crate::graph::KnobSlot;
use crate::types::{KnobKind, KnobValue};

/// Expression installed on one dimension of a knob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub text: String,
    /// True when the text is a multi-line script assigning to a `ret`
    /// variable instead of a single evaluatable line.
    pub has_ret_variable: bool,
}

/// Live master link of one dimension: the dimension mirrors
/// `target[dimension]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Master {
    pub target: KnobSlot,
    pub dimension: usize,
}

/// A typed, named, multi-dimensional parameter attached to a node or a
/// tracking marker.
///
/// Freshly built knobs are unattached and unnamed; the loader names them and
/// fills their state from the persisted record. Per-dimension link and
/// expression state always has exactly `dimension` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Knob {
    name: String,
    kind: KnobKind,
    dimension: usize,
    persistent: bool,
    ignores_masters_persistence: bool,
    values: Vec<KnobValue>,
    masters: Vec<Option<Master>>,
    expressions: Vec<Option<Expression>>,
    alias_target: Option<KnobSlot>,
    choice_label: Option<String>,
}

impl Knob {
    /// Builds an unnamed knob of `kind` with default state in every
    /// dimension.
    pub fn new(kind: KnobKind, dimension: usize) -> Knob {
        Knob {
            name: String::new(),
            kind,
            dimension,
            persistent: true,
            ignores_masters_persistence: false,
            values: vec![KnobValue::default_for(kind); dimension],
            masters: vec![None; dimension],
            expressions: vec![None; dimension],
            alias_target: None,
            choice_label: None,
        }
    }

    /// Script name of the knob, unique within its owning holder.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> KnobKind {
        self.kind
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether the knob takes part in persistence. Non-persistent knobs are
    /// never valid link targets.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn set_persistent(&mut self, persistent: bool) {
        self.persistent = persistent;
    }

    /// Whether the knob's master links are excluded from capture. The knob
    /// itself still persists; only its linkage is dropped on save.
    pub fn ignores_masters_persistence(&self) -> bool {
        self.ignores_masters_persistence
    }

    pub fn set_ignores_masters_persistence(&mut self, ignored: bool) {
        self.ignores_masters_persistence = ignored;
    }

    pub fn value(&self, dimension: usize) -> Option<&KnobValue> {
        self.values.get(dimension)
    }

    /// Sets the value of one dimension; out-of-range dimensions are ignored.
    pub fn set_value(&mut self, dimension: usize, value: KnobValue) {
        if let Some(slot) = self.values.get_mut(dimension) {
            *slot = value;
        }
    }

    pub fn master(&self, dimension: usize) -> Option<&Master> {
        self.masters.get(dimension).and_then(|m| m.as_ref())
    }

    /// Slaves `dimension` to `target[master_dimension]`; out-of-range
    /// dimensions are ignored.
    pub fn slave_to(&mut self, dimension: usize, target: KnobSlot, master_dimension: usize) {
        if let Some(slot) = self.masters.get_mut(dimension) {
            *slot = Some(Master {
                target,
                dimension: master_dimension,
            });
        }
    }

    /// Target this knob is a full alias of, if any.
    pub fn alias_target(&self) -> Option<KnobSlot> {
        self.alias_target
    }

    /// Makes this knob a full alias of `target`. Aliasing covers the whole
    /// knob; dimension indices play no role.
    pub fn set_alias(&mut self, target: KnobSlot) {
        self.alias_target = Some(target);
    }

    pub fn expression(&self, dimension: usize) -> Option<&Expression> {
        self.expressions.get(dimension).and_then(|e| e.as_ref())
    }

    /// Installs an expression on one dimension after validating it through
    /// the engine.
    ///
    /// The expression is stored only if the engine accepts it; a rejected
    /// expression leaves the dimension untouched and the engine's failure
    /// detail is returned to the caller.
    pub fn install_expression(
        &mut self,
        dimension: usize,
        text: impl Into<String>,
        has_ret_variable: bool,
        engine: &dyn ExpressionEngine,
    ) -> Result<(), ExpressionError> {
        let text = text.into();
        if dimension >= self.dimension {
            return Err(ExpressionError::new(format!(
                "dimension {dimension} out of range for a {}-dimensional knob",
                self.dimension
            )));
        }
        engine.validate(&text, has_ret_variable)?;
        self.expressions[dimension] = Some(Expression {
            text,
            has_ret_variable,
        });
        Ok(())
    }

    /// Label of the selected entry, kept by choice knobs alongside the
    /// index so a reordered menu can be re-matched by text.
    pub fn choice_label(&self) -> Option<&str> {
        self.choice_label.as_deref()
    }

    pub fn set_choice_label(&mut self, label: impl Into<String>) {
        self.choice_label = Some(label.into());
    }
}
