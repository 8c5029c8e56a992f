use std::fmt::Write;

use lasso::RodeoResolver;

use crate::{
	common::{Label, Level},
	frontend::evaluate::EvaluateAuto as _,
	ir::{semantics::Value, syntax::Term},
};

fn resolve(label: Label, resolver: &RodeoResolver) -> &str {
	match label {
		Some(name) => resolver.resolve(&name),
		None => "_",
	}
}

/// Prints a core term as an expression.
pub fn print(term: &Term, f: &mut impl Write, resolver: &RodeoResolver) -> std::fmt::Result {
	use Term::*;
	match term {
		// Variables.
		Var(label, _) => f.write_str(resolve(*label, resolver)),

		// Let-expressions.
		Let { argument, tail } => {
			write!(f, "let {} = ", resolve(tail.parameter, resolver))?;
			print(argument, f, resolver)?;
			f.write_str("; ")?;
			print(&tail.body, f, resolver)
		}

		// The type of types.
		Type => f.write_str("Type"),

		// Dependent functions.
		Func { param, result } => {
			match result.parameter {
				Some(name) => write!(f, "Func ({} : ", resolver.resolve(&name))?,
				None => f.write_str("Func (")?,
			}
			print(param, f, resolver)?;
			f.write_str(") -> ")?;
			print(&result.body, f, resolver)
		}
		FuncOf { result } => {
			write!(f, "{{{} -> ", resolve(result.parameter, resolver))?;
			print(&result.body, f, resolver)?;
			f.write_str("}")
		}
		Call { operator, operand } => {
			print(operator, f, resolver)?;
			f.write_str(" (")?;
			print(operand, f, resolver)?;
			f.write_str(")")
		}

		// The closed modality.
		Closed(ty) => {
			f.write_str("Closed {")?;
			print(ty, f, resolver)?;
			f.write_str("}")
		}
		Close(element) => {
			f.write_str("close {")?;
			print(element, f, resolver)?;
			f.write_str("}")
		}
		Open(element) => {
			f.write_str("open {")?;
			print(element, f, resolver)?;
			f.write_str("}")
		}

		Hole => f.write_str("?"),
	}
}

/// Prints a core term to a fresh string.
pub fn pretty_print(term: &Term, resolver: &RodeoResolver) -> String {
	let mut string = String::new();
	print(term, &mut string, resolver).unwrap();
	string
}

/// Prints a value as an expression.
///
/// Variables print by their labels alone, so a value may mention binders outside the given
/// context and still render.
pub fn print_value(
	value: &Value,
	f: &mut impl Write,
	resolver: &RodeoResolver,
	level: Level,
) -> std::fmt::Result {
	use Value::*;
	match value {
		// Neutrals.
		Var(label, _) => f.write_str(resolve(*label, resolver)),
		Call { operator, operand } => {
			print_value(operator, f, resolver, level)?;
			f.write_str(" (")?;
			print_value(&operand.force(), f, resolver, level)?;
			f.write_str(")")
		}

		// The type of types.
		Type => f.write_str("Type"),

		// Dependent functions.
		Func { param, result } => {
			match result.parameter {
				Some(name) => write!(f, "Func ({} : ", resolver.resolve(&name))?,
				None => f.write_str("Func (")?,
			}
			print_value(&param.force(), f, resolver, level)?;
			f.write_str(") -> ")?;
			print_value(&result.evaluate_auto(level), f, resolver, level + 1)
		}
		FuncOf { result } => {
			write!(f, "{{{} -> ", resolve(result.parameter, resolver))?;
			print_value(&result.evaluate_auto(level), f, resolver, level + 1)?;
			f.write_str("}")
		}

		// The closed modality.
		Closed(ty) => {
			f.write_str("Closed {")?;
			print_value(&ty.force(), f, resolver, level)?;
			f.write_str("}")
		}
		Close(element) => {
			f.write_str("close {")?;
			print_value(&element.force(), f, resolver, level)?;
			f.write_str("}")
		}
		Open(element) => {
			f.write_str("open {")?;
			print_value(&element.force(), f, resolver, level)?;
			f.write_str("}")
		}

		Hole => f.write_str("?"),
	}
}

/// Prints a value to a fresh string.
pub fn pretty_print_value(value: &Value, resolver: &RodeoResolver, level: Level) -> String {
	let mut string = String::new();
	print_value(value, &mut string, resolver, level).unwrap();
	string
}
