use std::rc::Rc;

use lasso::RodeoResolver;

use crate::{
	common::{bind, Binder, Index, Label, Level, Name},
	frontend::{
		conversion::Conversion as _,
		evaluate::EvaluateWith as _,
		unparse::{pretty_print, pretty_print_value},
	},
	ir::{
		presyntax::{Expression, ParsedLabel, Preterm},
		semantics::{Environment, Thunk, Value},
		source::Diagnostics,
		syntax::Term,
	},
};

/// Elaborates an expression to a core term, synthesizing or checking its type.
pub fn elaborate(
	resolver: &RodeoResolver,
	expression: Expression,
	expected: Option<Rc<Value>>,
) -> (Term, Rc<Value>, Diagnostics) {
	let mut elaborator = Elaborator { resolver, diagnostics: Diagnostics::new() };
	let term = elaborator.elaborate(&Context::empty(), expression, expected);
	(term.term, term.ty, elaborator.diagnostics)
}

#[derive(Clone)]
pub struct Context {
	environment: Environment,
	types: Vec<(Label, Rc<Thunk>)>,
}

impl Context {
	pub fn empty() -> Self { Self { environment: Environment::new(), types: Vec::new() } }

	pub fn len(&self) -> Level {
		debug_assert_eq!(self.environment.0.len(), self.types.len());
		self.environment.level()
	}

	// Extends with a binding; one without a value of its own stands for a fresh variable.
	#[must_use]
	pub fn extend(&self, label: Label, ty: Rc<Thunk>, value: Option<Rc<Thunk>>) -> Self {
		let value = value.unwrap_or_else(|| Rc::new(Thunk::from(Value::Var(label, self.len()))));
		let mut context = self.clone();
		context.environment = context.environment.extend(value);
		context.types.push((label, ty));
		context
	}

	// Resolves a name to its rightmost binding.
	fn resolve(&self, name: Name) -> Option<(Index, Rc<Thunk>)> {
		self
			.types
			.iter()
			.rev()
			.enumerate()
			.find(|(_, (label, _))| *label == Some(name))
			.map(|(index, (_, ty))| (Index(index), ty.clone()))
	}
}

struct Elaborator<'r> {
	resolver: &'r RodeoResolver,
	diagnostics: Diagnostics,
}

impl<'r> Elaborator<'r> {
	fn synthesize(&mut self, context: &Context, expression: Expression) -> AnnotatedTerm {
		self.elaborate(context, expression, None)
	}

	fn verify(&mut self, context: &Context, expression: Expression, expected: Rc<Value>) -> Term {
		self.elaborate(context, expression, Some(expected)).term
	}

	fn elaborate(
		&mut self,
		context: &Context,
		expression: Expression,
		expected: Option<Rc<Value>>,
	) -> AnnotatedTerm {
		let range = expression.range;
		match (expression.preterm, expected) {
			// Variables.
			(Preterm::Var(name), None) => match context.resolve(name) {
				Some((index, ty)) => Term::Var(Some(name), index).annotate(ty.force()),
				None => {
					self.diagnostics.report(range, format!("Variable not found: {}", self.resolver.resolve(&name)));
					Term::Hole.annotate(Rc::new(Value::Hole))
				}
			},

			// Let-expressions: the annotation gives the binding its type, and the binding is opaque
			// in the tail.
			// TODO: Elaborate the definition, check it against the annotation, and expose its value
			// to the tail.
			(Preterm::Let { ty, argument: _, tail }, expected) => {
				let ty = self.verify(context, *ty, Rc::new(Value::Type));
				let bound_type = Rc::new(Thunk::new(context.environment.clone(), ty.clone()));
				let tail_context = context.extend(tail.parameter.label, bound_type, None);
				let tail_body = self.elaborate(&tail_context, *tail.body, expected);
				Term::Let { argument: ty.into(), tail: bind(tail.parameter.label, tail_body.term) }
					.annotate(tail_body.ty)
			}

			// The type of types.
			(Preterm::Type, None) => Term::Type.annotate(Rc::new(Value::Type)),
			(Preterm::Type, Some(expected)) if matches!(&*expected, Value::Type) =>
				Term::Type.annotate(expected),

			// Dependent functions.
			(Preterm::Func { param, result }, None) => self.elaborate_func(context, param, result),
			(Preterm::Func { param, result }, Some(expected)) if matches!(&*expected, Value::Type) =>
				self.elaborate_func(context, param, result),
			(Preterm::FuncOf { result }, None) => {
				let label = result.parameter.label;
				let body_context = context.extend(label, Rc::new(Thunk::from(Value::Hole)), None);
				let body = self.synthesize(&body_context, *result.body);
				let term = Term::FuncOf { result: bind(label, body.term) };
				let message = format!("cannot synthesize type of {}", pretty_print(&term, self.resolver));
				self.diagnostics.report(range, message);
				term.annotate(Rc::new(Value::Hole))
			}
			(Preterm::FuncOf { result }, Some(expected)) if matches!(&*expected, Value::Func { .. }) => {
				let Value::Func { param, result: codomain } = &*expected else { unreachable!() };
				let label = result.parameter.label;
				let variable = Rc::new(Thunk::from(Value::Var(label, context.len())));
				let body_context = context.extend(label, param.clone(), Some(variable.clone()));
				let body_type = Rc::new(codomain.evaluate_with(variable));
				let body = self.verify(&body_context, *result.body, body_type);
				Term::FuncOf { result: bind(label, body) }.annotate(expected)
			}
			(Preterm::Call { operator, operand }, None) => {
				let operator_range = operator.range;
				let operator = self.synthesize(context, *operator);
				match &*operator.ty {
					Value::Func { param, result } => {
						let operand = self.verify(context, *operand, param.force());
						let ty =
							result.evaluate_with(Rc::new(Thunk::new(context.environment.clone(), operand.clone())));
						Term::Call { operator: operator.term.into(), operand: operand.into() }.annotate(Rc::new(ty))
					}
					ty => {
						if !matches!(ty, Value::Hole) {
							self.diagnostics.report(operator_range, "expected function type");
						}
						let operand = self.verify(context, *operand, Rc::new(Value::Hole));
						Term::Call { operator: operator.term.into(), operand: operand.into() }
							.annotate(Rc::new(Value::Hole))
					}
				}
			}

			// The closed modality.
			(Preterm::Closed(element), None) => self.elaborate_closed(context, element),
			(Preterm::Closed(element), Some(expected)) if matches!(&*expected, Value::Type) =>
				self.elaborate_closed(context, element),
			(Preterm::Close(element), Some(expected)) if matches!(&*expected, Value::Closed(_)) => {
				let Value::Closed(ty) = &*expected else { unreachable!() };
				let element = self.verify(context, *element, ty.force());
				Term::Close(element.into()).annotate(expected)
			}
			(Preterm::Close(element), None) => {
				let element = self.synthesize(context, *element);
				Term::Close(element.term.into())
					.annotate(Rc::new(Value::Closed(Rc::new(Thunk::from(element.ty)))))
			}
			(Preterm::Open(element), None) => {
				let element_range = element.range;
				let element = self.synthesize(context, *element);
				match &*element.ty {
					Value::Closed(ty) => {
						let ty = ty.force();
						Term::Open(element.term.into()).annotate(ty)
					}
					ty => {
						if !matches!(ty, Value::Hole) {
							self.diagnostics.report(element_range, "expected Closed type");
						}
						Term::Open(element.term.into()).annotate(Rc::new(Value::Hole))
					}
				}
			}

			// Holes.
			(Preterm::Hole, expected) => Term::Hole.annotate(expected.unwrap_or_else(|| Rc::new(Value::Hole))),

			// Bidirectional fallback: synthesize, then convert to the expected type.
			(preterm, Some(expected)) => {
				let synthesized = self.synthesize(context, preterm.at(range));
				if !context.len().can_convert(&*synthesized.ty, &*expected) {
					// A synthesized type may mention a binding whose scope has already ended, so both
					// sides render from the value directly rather than through unevaluation.
					let expected = pretty_print_value(&expected, self.resolver, context.len());
					let actual = pretty_print_value(&synthesized.ty, self.resolver, context.len());
					self.diagnostics.report(range, format!("type mismatch: expected {expected}, actual {actual}"));
				}
				synthesized
			}
		}
	}

	fn elaborate_func(
		&mut self,
		context: &Context,
		param: Box<Expression>,
		result: Binder<ParsedLabel, Box<Expression>>,
	) -> AnnotatedTerm {
		let param = self.verify(context, *param, Rc::new(Value::Type));
		let param_type = Rc::new(Thunk::new(context.environment.clone(), param.clone()));
		let result_context = context.extend(result.parameter.label, param_type, None);
		let body = self.verify(&result_context, *result.body, Rc::new(Value::Type));
		Term::Func { param: param.into(), result: bind(result.parameter.label, body) }
			.annotate(Rc::new(Value::Type))
	}

	fn elaborate_closed(&mut self, context: &Context, element: Box<Expression>) -> AnnotatedTerm {
		let element = self.verify(context, *element, Rc::new(Value::Type));
		Term::Closed(element.into()).annotate(Rc::new(Value::Type))
	}
}

impl Term {
	fn annotate(self, ty: Rc<Value>) -> AnnotatedTerm { AnnotatedTerm { term: self, ty } }
}

struct AnnotatedTerm {
	term: Term,
	ty: Rc<Value>,
}
