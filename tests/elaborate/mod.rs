use std::rc::Rc;

use ctt::{
	common::{Index, Level},
	frontend::{
		conversion::Conversion as _,
		elaborate::elaborate,
		evaluate::Evaluate as _,
		parse::parse,
		unparse::{pretty_print, pretty_print_value},
	},
	ir::{
		semantics::Value,
		source::{Position, Range},
		syntax::Term,
	},
};

use crate::common::{elaborate_source, messages};

#[test]
fn the_type_of_types_synthesizes_itself() {
	let (term, ty, _) = elaborate_source("Type");
	assert!(matches!(term, Term::Type));
	assert!(matches!(&*ty, Value::Type));
}

#[test]
fn function_types_synthesize_the_type_of_types() {
	let (term, ty, _) = elaborate_source("Func (x : Type) -> x");
	assert!(matches!(term, Term::Func { .. }));
	assert!(matches!(&*ty, Value::Type));
}

#[test]
fn a_lambda_checks_against_a_function_type() {
	let (func_type, _, _) = elaborate_source("Func (x : Type) -> Type");
	let expected = Rc::new(func_type.evaluate());

	let (expression, resolver, diagnostics) = parse("{x -> x}");
	assert!(diagnostics.is_empty());
	let (term, ty, diagnostics) = elaborate(&resolver, expression, Some(expected.clone()));
	assert!(diagnostics.is_empty());
	let Term::FuncOf { result } = term else { panic!("expected a lambda") };
	assert!(matches!(*result.body, Term::Var(_, Index(0))));
	assert!(Level(0).can_convert(&*ty, &*expected));
}

#[test]
fn a_lambda_does_not_synthesize() {
	let (expression, resolver, diagnostics) = parse("{x -> x}");
	assert!(diagnostics.is_empty());
	let (term, ty, diagnostics) = elaborate(&resolver, expression, None);
	let messages: Vec<_> = diagnostics.into_iter().map(|diagnostic| diagnostic.message).collect();
	assert_eq!(messages, ["cannot synthesize type of {x -> x}"]);
	assert!(matches!(term, Term::FuncOf { .. }));
	assert!(matches!(&*ty, Value::Hole));
}

#[test]
fn close_synthesizes_a_closed_type() {
	let (term, ty, _) = elaborate_source("close {Type}");
	assert!(matches!(term, Term::Close(_)));
	assert!(matches!(&*ty, Value::Closed(_)));
}

#[test]
fn close_checks_against_a_closed_type() {
	let (closed_type, _, _) = elaborate_source("Closed {Type}");
	let expected = Rc::new(closed_type.evaluate());

	let (expression, resolver, diagnostics) = parse("close {Type}");
	assert!(diagnostics.is_empty());
	let (term, _, diagnostics) = elaborate(&resolver, expression, Some(expected));
	assert!(diagnostics.is_empty());
	assert!(matches!(term, Term::Close(_)));
}

#[test]
fn open_projects_a_closed_type() {
	let (term, ty, _) = elaborate_source("open {close {Type}}");
	assert!(matches!(term, Term::Open(_)));
	assert!(matches!(&*ty, Value::Type));
}

#[test]
fn open_rejects_an_unclosed_element() {
	let (expression, resolver, diagnostics) = parse("open {Type}");
	assert!(diagnostics.is_empty());
	let (_, ty, diagnostics) = elaborate(&resolver, expression, None);
	let diagnostics: Vec<_> = diagnostics.into_iter().collect();
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].message, "expected Closed type");
	assert_eq!(
		diagnostics[0].range,
		Range::new(Position { line: 0, character: 6 }, Position { line: 0, character: 10 })
	);
	assert!(matches!(&*ty, Value::Hole));
}

#[test]
fn a_let_binding_takes_its_type_from_the_annotation() {
	let (term, ty, _) = elaborate_source("let x : Closed {Type} = Type; x");
	assert!(matches!(term, Term::Let { .. }));
	assert!(matches!(&*ty, Value::Closed(_)));
}

#[test]
fn the_let_definition_is_not_consulted() {
	let (term, ty, _) = elaborate_source("let x : Type = unbound; x");
	assert!(matches!(term, Term::Let { .. }));
	assert!(matches!(&*ty, Value::Type));
}

#[test]
fn an_unresolved_variable_reports_and_recovers() {
	let (expression, resolver, diagnostics) = parse("y");
	assert!(diagnostics.is_empty());
	let (term, ty, diagnostics) = elaborate(&resolver, expression, None);
	let diagnostics: Vec<_> = diagnostics.into_iter().collect();
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].message, "Variable not found: y");
	assert_eq!(
		diagnostics[0].range,
		Range::new(Position { line: 0, character: 0 }, Position { line: 0, character: 1 })
	);
	assert!(matches!(term, Term::Hole));
	assert!(matches!(&*ty, Value::Hole));
}

#[test]
fn calling_a_non_function_reports_at_the_operator() {
	let (expression, resolver, diagnostics) = parse("Type (Type)");
	assert!(diagnostics.is_empty());
	let (term, ty, diagnostics) = elaborate(&resolver, expression, None);
	let diagnostics: Vec<_> = diagnostics.into_iter().collect();
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].message, "expected function type");
	assert_eq!(
		diagnostics[0].range,
		Range::new(Position { line: 0, character: 0 }, Position { line: 0, character: 4 })
	);
	assert!(matches!(term, Term::Call { .. }));
	assert!(matches!(&*ty, Value::Hole));
}

#[test]
fn application_takes_the_result_type() {
	let (term, ty, _) = elaborate_source("let f : Func (x : Type) -> Type = Type; f (Type)");
	assert!(matches!(&*ty, Value::Type));
	let Term::Let { tail, .. } = term else { panic!("expected a let") };
	assert!(matches!(*tail.body, Term::Call { .. }));
}

#[test]
fn application_substitutes_into_the_result_type() {
	let (_, ty, _) = elaborate_source("let f : Func (A : Type) -> A = Type; f (Closed {Type})");
	assert!(matches!(&*ty, Value::Closed(_)));
}

#[test]
fn an_operand_mismatch_reports_both_types() {
	assert_eq!(
		messages("let f : Func (x : Closed {Type}) -> Type = Type; f (Type)"),
		["type mismatch: expected Closed {Type}, actual Type"]
	);
}

#[test]
fn a_failed_operator_reports_once() {
	assert_eq!(messages("y (Type)"), ["Variable not found: y"]);
}

#[test]
fn a_failed_open_element_reports_once() {
	assert_eq!(messages("open {y}"), ["Variable not found: y"]);
}

#[test]
fn shadowed_names_resolve_to_the_nearest_binding() {
	let (term, _, resolver) = elaborate_source("let x : Type = Type; let x : Closed {x} = Type; x");
	assert_eq!(pretty_print(&term, &resolver), "let x = Type; let x = Closed {x}; x");
}

#[test]
fn an_escaped_binding_renders_by_its_label() {
	let (_, ty, resolver) = elaborate_source("let A : Type = Type; let a : A = Type; a");
	assert!(matches!(&*ty, Value::Var(_, Level(0))));
	assert_eq!(pretty_print_value(&ty, &resolver, Level(0)), "A");
}

#[test]
fn a_mismatch_mentioning_an_escaped_binding_still_reports() {
	assert_eq!(
		messages(
			"let f : Func (x : Type) -> Type = Type; f (close { let A : Type = Type; let a : A = Type; a })"
		),
		["type mismatch: expected Type, actual Closed {A}"]
	);
}
