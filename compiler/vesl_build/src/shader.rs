//! The finished output of a build.

use vesl_ir::{IrTree, VarId};

use crate::registry::{VarRecord, VarRegistry};

/// A closed instruction tree together with the resolved variable registry.
///
/// Produced by [`BuildContext::finish`](crate::BuildContext::finish); this
/// is what the code generator renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shader {
    tree: IrTree,
    registry: VarRegistry,
}

impl Shader {
    pub(crate) fn new(tree: IrTree, registry: VarRegistry) -> Self {
        Self { tree, registry }
    }

    #[inline]
    pub fn tree(&self) -> &IrTree {
        &self.tree
    }

    #[inline]
    pub fn registry(&self) -> &VarRegistry {
        &self.registry
    }

    #[inline]
    pub fn var(&self, id: VarId) -> Option<&VarRecord> {
        self.registry.get(id)
    }
}
