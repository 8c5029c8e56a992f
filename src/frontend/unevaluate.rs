use crate::{
	common::{bind, Binder, Index, Label, Level},
	frontend::evaluate::EvaluateAuto as _,
	ir::{
		semantics::{Closure, Value},
		syntax::Term,
	},
};

/// Transforms values into core terms.
pub trait Unevaluate {
	type Core;

	/// Transforms a value into a core term.
	fn unevaluate(&self) -> Self::Core { self.unevaluate_in(Level(0)) }

	fn unevaluate_in(&self, level: Level) -> Self::Core { self.try_unevaluate_in(level).unwrap() }

	/// Fails if the value mentions a variable bound outside the given context.
	fn try_unevaluate_in(&self, level: Level) -> Option<Self::Core>;
}

impl Unevaluate for Value {
	type Core = Term;
	fn try_unevaluate_in(&self, level @ Level(context_length): Level) -> Option<Self::Core> {
		use Value::*;
		Some(match self {
			// Neutrals.
			Var(name, Level(variable)) =>
				Term::Var(*name, Index(context_length.checked_sub(variable + 1)?)),
			Call { operator, operand } => Term::Call {
				operator: operator.try_unevaluate_in(level)?.into(),
				operand: operand.force().try_unevaluate_in(level)?.into(),
			},

			// The type of types.
			Type => Term::Type,

			// Dependent functions.
			Func { param, result } => Term::Func {
				param: param.force().try_unevaluate_in(level)?.into(),
				result: result.try_unevaluate_in(level)?,
			},
			FuncOf { result } => Term::FuncOf { result: result.try_unevaluate_in(level)? },

			// The closed modality.
			Closed(ty) => Term::Closed(ty.force().try_unevaluate_in(level)?.into()),
			Close(element) => Term::Close(element.force().try_unevaluate_in(level)?.into()),
			Open(element) => Term::Open(element.force().try_unevaluate_in(level)?.into()),

			Hole => Term::Hole,
		})
	}
}

impl Unevaluate for Closure {
	type Core = Binder<Label, Box<Term>>;
	fn try_unevaluate_in(&self, level: Level) -> Option<Self::Core> {
		Some(bind(self.parameter, self.evaluate_auto(level).try_unevaluate_in(level + 1)?))
	}
}
