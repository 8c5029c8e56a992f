use std::rc::Rc;

use crate::{
	common::{Binder, Label, Level},
	ir::{
		semantics::{Closure, Environment, Thunk, Value},
		syntax::Term,
	},
};

pub trait Evaluate {
	type Value;
	/// Transforms a core term into a value.
	fn evaluate(self) -> Self::Value
	where
		Self: Sized,
	{
		self.evaluate_in(&Environment::new())
	}

	fn evaluate_in(self, environment: &Environment) -> Self::Value;
}

impl Evaluate for Binder<Label, Box<Term>> {
	type Value = Closure;
	fn evaluate_in(self, environment: &Environment) -> Self::Value {
		Closure::new(environment.clone(), self.parameter, *self.body)
	}
}

impl Evaluate for Term {
	type Value = Value;
	fn evaluate_in(self, environment: &Environment) -> Self::Value {
		use Term::*;
		match self {
			// Variables.
			Var(_, index) => environment.lookup(index).force().as_ref().clone(),

			// Let-expressions.
			Let { argument, tail } => tail
				.body
				.evaluate_in(&environment.extend(Rc::new(Thunk::new(environment.clone(), *argument)))),

			// The type of types.
			Type => Value::Type,

			// Dependent functions.
			Func { param, result } => Value::Func {
				param: Rc::new(Thunk::new(environment.clone(), *param)),
				result: Rc::new(result.evaluate_in(environment)),
			},
			FuncOf { result } => Value::FuncOf { result: Rc::new(result.evaluate_in(environment)) },
			Call { operator, operand } => {
				let operand = Rc::new(Thunk::new(environment.clone(), *operand));
				match operator.evaluate_in(environment) {
					Value::FuncOf { result } => result.evaluate_with(operand),
					operator => Value::Call { operator: operator.into(), operand },
				}
			}

			// The closed modality.
			Closed(element) => Value::Closed(Rc::new(Thunk::new(environment.clone(), *element))),
			Close(element) => Value::Close(Rc::new(Thunk::new(environment.clone(), *element))),
			Open(element) => Value::Open(Rc::new(Thunk::new(environment.clone(), *element))),

			Hole => Value::Hole,
		}
	}
}

pub trait EvaluateWith {
	type Value;
	/// Transforms a core closure under a binder into a value, taking an argument.
	fn evaluate_with(self, argument: Rc<Thunk>) -> Self::Value;
}

impl EvaluateWith for &Closure {
	type Value = Value;
	fn evaluate_with(self, argument: Rc<Thunk>) -> Self::Value {
		self.body.clone().evaluate_in(&self.environment.extend(argument))
	}
}

pub trait EvaluateAuto {
	type Value;
	/// Evaluates a closure on its own parameter by postulating it and passing it in.
	fn evaluate_auto(&self, context_len: Level) -> Self::Value;
}

impl EvaluateAuto for Closure {
	type Value = Value;
	fn evaluate_auto(&self, context_len: Level) -> Self::Value {
		self.evaluate_with(Rc::new(Thunk::from(Value::Var(self.parameter, context_len))))
	}
}
