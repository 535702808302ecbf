//! Global declarations: structs, interface blocks, globals and constants.

use vesl_ir::{
    CtorStatus, Expr, Field, InterfaceDeclaration, Instruction, Qualifier, StructDeclaration,
    TypeDesc, VarCategory, VarId,
};

use crate::context::CtorSpec;
use crate::{BuildContext, BuildError};

impl BuildContext {
    /// Declare a struct type and return the type that names it.
    pub fn declare_struct(
        &mut self,
        name: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<TypeDesc, BuildError> {
        let name = name.into();
        self.guard(|ctx| {
            let ty = TypeDesc::structure(name.clone());
            ctx.push_instruction(Instruction::Struct(StructDeclaration { name, fields }))?;
            Ok(ty)
        })
    }

    /// Declare an interface block such as `uniform Camera { ... } camera;`
    /// and return the variable of its instance.
    pub fn declare_interface(
        &mut self,
        qualifier: Qualifier,
        block_name: impl Into<String>,
        fields: Vec<Field>,
        instance: impl Into<String>,
    ) -> Result<VarId, BuildError> {
        let block_name = block_name.into();
        let instance = instance.into();
        self.guard(|ctx| {
            let var = ctx.registry.create(
                TypeDesc::structure(block_name.clone()),
                VarCategory::Other,
                Some(instance),
                CtorStatus::Declaration,
            );
            ctx.registry.disable(var)?;
            ctx.push_instruction(Instruction::Interface(InterfaceDeclaration {
                var,
                qualifier,
                block_name,
                fields,
            }))?;
            Ok(var)
        })
    }

    /// Declare a qualified global such as `in vec3 position;`.
    pub fn declare_global(
        &mut self,
        qualifier: Qualifier,
        ty: TypeDesc,
        name: impl Into<String>,
    ) -> Result<VarId, BuildError> {
        self.emit(
            CtorSpec::new(ty, CtorStatus::Declaration)
                .with_qualifier(qualifier)
                .with_name(name),
        )
    }

    /// Declare `const T name = value;`.
    pub fn declare_const(
        &mut self,
        ty: TypeDesc,
        name: impl Into<String>,
        value: Expr,
    ) -> Result<VarId, BuildError> {
        self.emit(
            CtorSpec::new(ty, CtorStatus::Initialisation)
                .with_qualifier(Qualifier::Const)
                .with_name(name)
                .with_args(vec![value]),
        )
    }
}
