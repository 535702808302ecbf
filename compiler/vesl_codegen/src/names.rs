//! Name table.
//!
//! Decides, per variable, what a reference renders as. Inlined variables
//! (resolved `Temporary` or `Forward`) render as their constructor's value;
//! everything else renders as a name. A name is fixed the first time the
//! variable is seen: its explicit name if it has one, otherwise the prefix
//! of its category plus a per-category counter, skipping names already
//! taken. The table lives for one render, so rendering the same shader
//! twice yields the same names.

use rustc_hash::{FxHashMap, FxHashSet};
use vesl_build::Shader;
use vesl_ir::{Constructor, Expr, Instruction, VarCategory, VarId};

use crate::RenderError;

/// What a reference to a variable renders as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Binding<'a> {
    Named(String),
    Inline(&'a Constructor),
}

pub(crate) struct NameTable<'a> {
    shader: &'a Shader,
    /// Constructor statement of every variable declared in the tree.
    ctors: FxHashMap<VarId, &'a Constructor>,
    names: FxHashMap<VarId, String>,
    taken: FxHashSet<String>,
    counters: [u32; VarCategory::COUNT],
}

impl<'a> NameTable<'a> {
    pub(crate) fn new(shader: &'a Shader) -> Self {
        let mut ctors = FxHashMap::default();
        for block in shader.tree().iter() {
            for instr in block.instructions() {
                if let Instruction::Statement(Expr::Constructor(ctor)) = instr {
                    ctors.insert(ctor.var, &**ctor);
                }
            }
        }
        let taken = shader
            .registry()
            .iter()
            .filter_map(|record| record.name.clone())
            .collect();
        Self {
            shader,
            ctors,
            names: FxHashMap::default(),
            taken,
            counters: [0; VarCategory::COUNT],
        }
    }

    /// What a reference to `id` renders as.
    pub(crate) fn binding(&mut self, id: VarId) -> Result<Binding<'a>, RenderError> {
        let shader = self.shader;
        let record = shader
            .var(id)
            .ok_or(RenderError::UnregisteredVariable(id))?;
        if record.is_inlined() {
            if let Some(&ctor) = self.ctors.get(&id) {
                return Ok(Binding::Inline(ctor));
            }
        }
        self.name_of(id).map(Binding::Named)
    }

    /// The name of `id`, assigned now if this is the first time it is seen.
    pub(crate) fn name_of(&mut self, id: VarId) -> Result<String, RenderError> {
        if let Some(name) = self.names.get(&id) {
            return Ok(name.clone());
        }
        let shader = self.shader;
        let record = shader
            .var(id)
            .ok_or(RenderError::UnregisteredVariable(id))?;
        let name = match &record.name {
            Some(name) => name.clone(),
            None => self.fresh(record.category),
        };
        tracing::trace!(%id, %name, "name registered");
        self.names.insert(id, name.clone());
        Ok(name)
    }

    fn fresh(&mut self, category: VarCategory) -> String {
        let counter = &mut self.counters[category.index()];
        loop {
            let candidate = format!("{}{}", category.prefix(), *counter);
            *counter += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests;
