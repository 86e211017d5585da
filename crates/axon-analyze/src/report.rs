//! The result of analyzing one definition (spec §4.4: `{valid, type,
//! defTypes, stdUsage}` on success, `{valid: false, error}` on failure).

use axon_common::{ErrorKind, Identifier, Path};
use axon_types::TypeId;
use rustc_hash::FxHashSet;

/// Which definition-graph tags contributed to a computed type, accumulated
/// from every node visited while analyzing it (spec §4.4 step 10).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefTag {
    Null,
    Bool,
    Number,
    Str,
    InlineArray,
    RefList,
    Call,
    Function,
    Switch,
}

#[derive(Clone, Debug)]
pub struct AnalysisReport {
    pub ty: TypeId,
    pub def_types: FxHashSet<DefTag>,
    pub std_usage: FxHashSet<Identifier>,
}

impl AnalysisReport {
    pub fn leaf(ty: TypeId, tag: DefTag) -> Self {
        AnalysisReport { ty, def_types: FxHashSet::from_iter([tag]), std_usage: FxHashSet::default() }
    }

    /// An analysis result with no tag of its own — used for synthetic
    /// lookups (stdlib natives, function parameters, unresolved stubs).
    pub fn bare(ty: TypeId) -> Self {
        AnalysisReport { ty, def_types: FxHashSet::default(), std_usage: FxHashSet::default() }
    }

    /// Folds `other`'s accumulated tag/usage sets into `self`, leaving
    /// `self.ty` untouched — callers overwrite `ty` separately once the
    /// combined type is computed.
    pub fn absorb(&mut self, other: &AnalysisReport) {
        self.def_types.extend(other.def_types.iter().copied());
        self.std_usage.extend(other.std_usage.iter().cloned());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub kind: ErrorKind,
    pub path: Path,
}

pub type AnalyzeResult = Result<AnalysisReport, AnalysisFailure>;
