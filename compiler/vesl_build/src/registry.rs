//! Variable registry.
//!
//! Hands out [`VarId`]s and tracks, per variable, how it has been used so
//! far. The lifecycle status it keeps decides how the code generator renders
//! the constructor: as a named declaration, or inlined at its single use.
//!
//! # Transitions
//!
//! | event                      | effect                                          |
//! |----------------------------|-------------------------------------------------|
//! | named use (`mark_used`)    | `Forward`/`Temporary` → `Initialisation`         |
//! | first consumption, fresh   | unnamed, never used by name → `Temporary`        |
//! | any other consumption      | `Forward`/`Temporary` → `Initialisation`          |
//! | `elide_dead` at finish     | unnamed, unused `Initialisation` → `Temporary`   |
//!
//! A consumption is fresh when no instruction has been pushed since the
//! constructor itself. Inlining a value read later would move its
//! evaluation past whatever was pushed in between.
//!
//! Disabled records (function arguments, globals, for-header inits) never
//! change status.

use vesl_ir::{CtorStatus, TypeDesc, VarCategory, VarId};

use crate::BuildError;

/// Everything the registry knows about one variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarRecord {
    pub id: VarId,
    /// Explicit name given at construction.
    pub name: Option<String>,
    pub category: VarCategory,
    pub ty: TypeDesc,
    /// Uses as a bound name.
    pub usage_count: u32,
    /// Uses as a disposable temporary.
    pub consume_count: u32,
    status: CtorStatus,
    disabled: bool,
    /// Push count when the constructor was committed.
    built_at: u64,
}

impl VarRecord {
    /// Current lifecycle status.
    #[inline]
    pub fn status(&self) -> CtorStatus {
        self.status
    }

    /// Check whether the status is pinned.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Check whether the value is inlined at its use site.
    #[inline]
    pub fn is_inlined(&self) -> bool {
        matches!(self.status, CtorStatus::Temporary | CtorStatus::Forward)
    }
}

/// Registry of all variables of one build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarRegistry {
    records: Vec<VarRecord>,
    /// Instructions pushed so far.
    pushes: u64,
}

impl VarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh variable.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "variable counts never exceed u32"
    )]
    pub fn create(
        &mut self,
        ty: TypeDesc,
        category: VarCategory,
        name: Option<String>,
        status: CtorStatus,
    ) -> VarId {
        let id = VarId::new(self.records.len() as u32);
        tracing::trace!(%id, ?category, ?name, ?status, "variable created");
        self.records.push(VarRecord {
            id,
            name,
            category,
            ty,
            usage_count: 0,
            consume_count: 0,
            status,
            disabled: false,
            built_at: self.pushes,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: VarId) -> Option<&VarRecord> {
        self.records.get(id.index())
    }

    fn get_mut(&mut self, id: VarId) -> Result<&mut VarRecord, BuildError> {
        self.records
            .get_mut(id.index())
            .ok_or(BuildError::UnknownVariable(id))
    }

    /// Current status of `id`.
    pub fn status(&self, id: VarId) -> Option<CtorStatus> {
        self.get(id).map(VarRecord::status)
    }

    /// Count one pushed instruction. `built` is the variable its
    /// constructor declares, if any.
    pub fn record_push(&mut self, built: Option<VarId>) {
        self.pushes += 1;
        if let Some(record) = built.and_then(|id| self.records.get_mut(id.index())) {
            record.built_at = self.pushes;
        }
    }

    /// Record a use of `id` as a bound name.
    pub fn mark_used(&mut self, id: VarId) -> Result<(), BuildError> {
        let record = self.get_mut(id)?;
        record.usage_count += 1;
        if !record.disabled && matches!(record.status, CtorStatus::Forward | CtorStatus::Temporary)
        {
            tracing::trace!(%id, from = ?record.status, "pinned as named variable");
            record.status = CtorStatus::Initialisation;
        }
        Ok(())
    }

    /// Record a use of `id` as a temporary.
    ///
    /// Only a single use right after construction inlines the value; any
    /// other consumption binds it to a name.
    pub fn consume(&mut self, id: VarId) -> Result<(), BuildError> {
        let pushes = self.pushes;
        let record = self.get_mut(id)?;
        record.consume_count += 1;
        if record.disabled {
            return Ok(());
        }
        let fresh = record.built_at == pushes;
        match record.status {
            CtorStatus::Forward | CtorStatus::Initialisation
                if fresh
                    && record.usage_count == 0
                    && record.consume_count == 1
                    && record.name.is_none() =>
            {
                tracing::trace!(%id, from = ?record.status, "consumed as temporary");
                record.status = CtorStatus::Temporary;
            }
            CtorStatus::Forward | CtorStatus::Temporary => {
                tracing::trace!(%id, fresh, "consumed value pinned as named variable");
                record.status = CtorStatus::Initialisation;
            }
            _ => {}
        }
        Ok(())
    }

    /// Pin the status of `id`; it is always considered used.
    pub fn disable(&mut self, id: VarId) -> Result<(), BuildError> {
        self.get_mut(id)?.disabled = true;
        Ok(())
    }

    /// Turn unnamed declarations nobody reads into temporaries.
    ///
    /// Returns how many records were elided.
    pub fn elide_dead(&mut self) -> usize {
        let mut elided = 0;
        for record in &mut self.records {
            if !record.disabled
                && record.status == CtorStatus::Initialisation
                && record.name.is_none()
                && record.usage_count == 0
                && record.consume_count == 0
            {
                record.status = CtorStatus::Temporary;
                elided += 1;
            }
        }
        if elided > 0 {
            tracing::debug!(elided, "dead declarations elided");
        }
        elided
    }

    /// Forget every variable; the next id is 0 again.
    pub fn clear(&mut self) {
        self.records.clear();
        self.pushes = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VarRecord> {
        self.records.iter()
    }
}
