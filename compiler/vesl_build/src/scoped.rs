//! Closure-scoped helpers over the `begin_*` / `end_*` pairs.
//!
//! Each helper opens a scope, runs the body against the context and closes
//! the scope again, so the pairs cannot go out of balance. An error from
//! the body is returned as-is; the context is already poisoned by then.

use vesl_ir::{Expr, ForClauses, Literal, Qualifier, TypeDesc, VarId};

use crate::{BuildContext, BuildError};

/// Body of one switch case for [`BuildContext::switch_on`].
pub type CaseBody<'a> = Box<dyn FnOnce(&mut BuildContext) -> Result<(), BuildError> + 'a>;

impl BuildContext {
    /// `if (condition) { then }`
    pub fn if_then<F>(&mut self, condition: Expr, then: F) -> Result<(), BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        self.begin_if(condition)?;
        then(self)?;
        self.end_if()
    }

    /// `if (condition) { then } else { otherwise }`
    pub fn if_else<F, G>(
        &mut self,
        condition: Expr,
        then: F,
        otherwise: G,
    ) -> Result<(), BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
        G: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        self.begin_if(condition)?;
        then(self)?;
        self.end_if_sub_block()?;
        self.begin_else()?;
        otherwise(self)?;
        self.end_if_sub_block()
    }

    /// `while (condition) { body }`
    pub fn while_loop<F>(&mut self, condition: Expr, body: F) -> Result<(), BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        self.begin_while(condition)?;
        body(self)?;
        self.end_while()
    }

    /// `for (clauses) { body }` with pre-separated clauses.
    pub fn for_loop<F>(&mut self, clauses: ForClauses, body: F) -> Result<(), BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        self.begin_for_clauses(clauses)?;
        body(self)?;
        self.end_for()
    }

    /// `switch (selector) { case ...: { ... } }`, one body per label in
    /// order. A `None` label is `default`.
    pub fn switch_on(
        &mut self,
        selector: Expr,
        cases: Vec<(Option<Literal>, CaseBody<'_>)>,
    ) -> Result<(), BuildError> {
        self.begin_switch(selector)?;
        for (label, body) in cases {
            self.add_case(label)?;
            body(self)?;
        }
        self.end_switch()
    }

    /// A single-overload function. The body receives the parameter
    /// variables in declaration order.
    pub fn function<F>(
        &mut self,
        name: &str,
        return_type: TypeDesc,
        params: &[(TypeDesc, &str, Option<Qualifier>)],
        body: F,
    ) -> Result<VarId, BuildError>
    where
        F: FnOnce(&mut Self, &[VarId]) -> Result<(), BuildError>,
    {
        let types = params.iter().map(|(ty, _, _)| ty.clone()).collect();
        let func = self.begin_func_with(name, return_type, types)?;
        let mut vars = Vec::with_capacity(params.len());
        for (ty, param, qualifier) in params {
            vars.push(self.declare_param(ty.clone(), Some(*param), *qualifier)?);
        }
        body(self, &vars)?;
        self.end_func()?;
        Ok(func)
    }
}
