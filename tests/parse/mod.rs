use ctt::{
	frontend::parse::parse,
	ir::{
		presyntax::Preterm,
		source::{Position, Range},
	},
};

fn diagnostics(source: &str) -> Vec<(String, Range)> {
	let (_, _, diagnostics) = parse(source);
	diagnostics.into_iter().map(|diagnostic| (diagnostic.message, diagnostic.range)).collect()
}

fn range(start: (u32, u32), end: (u32, u32)) -> Range {
	Range::new(Position { line: start.0, character: start.1 }, Position { line: end.0, character: end.1 })
}

#[test]
fn empty_input_recovers_to_a_hole() {
	let (expression, _, diagnostics) = parse("");
	assert!(matches!(expression.preterm, Preterm::Hole));
	let diagnostics: Vec<_> = diagnostics.into_iter().collect();
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].message, "unexpected end of file");
}

#[test]
fn trailing_input_is_reported() {
	assert_eq!(diagnostics("Type Type"), [("expected end of file".to_owned(), range((0, 5), (0, 6)))]);
}

#[test]
fn a_missing_colon_is_reported_once() {
	assert_eq!(diagnostics("Func (x Type) -> Type"), [("expected ':'".to_owned(), range((0, 8), (0, 9)))]);
}

#[test]
fn function_binders_may_be_named_or_bare() {
	let (expression, _, diagnostics) = parse("Func (x : Type) -> x");
	assert!(diagnostics.is_empty());
	let Preterm::Func { result, .. } = expression.preterm else { panic!("expected a function type") };
	assert!(result.parameter.label.is_some());
	assert_eq!(result.parameter.range, range((0, 6), (0, 7)));

	let (expression, _, diagnostics) = parse("Func (Closed {Type}) -> Type");
	assert!(diagnostics.is_empty());
	let Preterm::Func { result, .. } = expression.preterm else { panic!("expected a function type") };
	assert!(result.parameter.label.is_none());
}

#[test]
fn applications_nest_leftward() {
	let (expression, _, diagnostics) = parse("f (a) (b)");
	assert!(diagnostics.is_empty());
	assert_eq!(expression.range, range((0, 0), (0, 9)));
	let Preterm::Call { operator, .. } = expression.preterm else { panic!("expected an application") };
	assert!(matches!(operator.preterm, Preterm::Call { .. }));
}

#[test]
fn comments_and_carriage_returns_break_lines() {
	let (expression, _, diagnostics) = parse("# heading\r\nType");
	assert!(diagnostics.is_empty());
	assert!(matches!(expression.preterm, Preterm::Type));
	assert_eq!(expression.range, range((1, 0), (1, 4)));
}

#[test]
fn an_unterminated_lambda_reports_its_brace() {
	assert_eq!(diagnostics("{x -> x"), [("expected '}'".to_owned(), range((0, 7), (0, 8)))]);
}

#[test]
fn an_unrecognized_character_is_skipped() {
	let (expression, _, _) = parse("%");
	assert!(matches!(expression.preterm, Preterm::Hole));
	assert_eq!(diagnostics("%"), [("unrecognized character".to_owned(), range((0, 0), (0, 1)))]);
}

#[test]
fn a_let_carries_annotation_argument_and_tail() {
	let (expression, _, diagnostics) = parse("let x : Closed {Type} = Type; x");
	assert!(diagnostics.is_empty());
	let Preterm::Let { ty, argument, tail } = expression.preterm else { panic!("expected a let") };
	assert!(matches!(ty.preterm, Preterm::Closed(_)));
	assert!(matches!(argument.preterm, Preterm::Type));
	assert!(tail.parameter.label.is_some());
	assert!(matches!(tail.body.preterm, Preterm::Var(_)));
}
